//! Ports that connect the pipeline to its external collaborators.
//!
//! The pipeline never introspects implementations behind these traits; a
//! concrete classifier and notifier are injected at session start.

use crate::error::{ModelError, NotifyError};
use crate::types::{AlertEvent, FeatureVector, Prediction};

/// Port abstracting the trained posture classifier.
///
/// Implementations receive the averaged feature vector in the canonical
/// field order (guaranteed by the [`FeatureVector`] type) and return a
/// label, optionally with a confidence score. The pipeline treats the
/// model as fully trained and opaque.
pub trait Classifier: Send + Sync {
    /// Classify one averaged feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::PredictionFailed`] if the model cannot produce
    /// a verdict for this vector; the orchestrator skips the tick.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError>;
}

/// Port abstracting the external alert channel (push service, beeper).
///
/// Delivery is at-least-once: the dispatcher calls `notify` exactly once
/// per state transition and does not retry or deduplicate; a failed
/// delivery is reported and dropped without affecting the alert state.
pub trait AlertNotifier: Send + Sync {
    /// Deliver one alert transition.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the backend could not deliver; the
    /// caller logs and continues.
    fn notify(&self, event: AlertEvent) -> Result<(), NotifyError>;
}
