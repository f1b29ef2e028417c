//! # spineguard-core
//!
//! Core domain layer for the SpineGuard posture monitor, providing:
//!
//! - **Domain types**: [`RawSample`], [`FeatureVector`], [`PostureLabel`],
//!   [`AlertEvent`], [`MonitorStatus`]
//! - **Error hierarchy**: [`MonitorError`] and its subsystem errors, each
//!   carrying its own recoverability classification
//! - **Ports**: [`Classifier`] and [`AlertNotifier`] -- traits abstracting
//!   the trained model and the external alert channel

pub mod error;
pub mod traits;
pub mod types;

// Re-export key types at the crate root for convenience.
pub use error::{ModelError, MonitorError, MonitorResult, NotifyError, SampleError, SourceError};
pub use traits::{AlertNotifier, Classifier};
pub use types::{
    AlertEvent, FeatureVector, MonitorStatus, PostureLabel, Prediction, RawSample, FEATURE_NAMES,
};
