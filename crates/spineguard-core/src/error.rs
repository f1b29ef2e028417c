//! Error types for the SpineGuard posture monitor.
//!
//! Errors are split by subsystem, with a top-level [`MonitorError`] that
//! encompasses everything a monitoring session can surface. Every leaf type
//! answers [`is_recoverable`](SampleError::is_recoverable): recoverable
//! errors cause the current sample (or delivery) to be skipped while the
//! loop continues; non-recoverable errors terminate the session.

use thiserror::Error;

/// A specialized `Result` for monitoring-session operations.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Errors raised while turning a raw reading into a feature vector.
///
/// Lines that decode to fewer than six numeric fields never reach this
/// type; they are discarded by the codec without constructing an error.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SampleError {
    /// An axis value was NaN or infinite.
    #[error("non-finite value {value} for field '{field}'")]
    NonFinite {
        /// Canonical name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl SampleError {
    /// Sample errors are always recoverable: skip the sample, keep going.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }
}

/// Errors from the classifier artifact and predictions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ModelError {
    /// The artifact could not be read at session start.
    #[error("model artifact unavailable at '{path}': {reason}")]
    Unavailable {
        /// Path the loader attempted.
        path: String,
        /// Why the artifact could not be loaded.
        reason: String,
    },

    /// The artifact's declared feature order does not match the pipeline's.
    #[error("model feature schema mismatch: {detail}")]
    SchemaMismatch {
        /// Description of the mismatch.
        detail: String,
    },

    /// The artifact declares a class label the pipeline does not know.
    #[error("model declares unknown label '{label}'")]
    UnknownLabel {
        /// The unparseable label text.
        label: String,
    },

    /// The artifact is structurally invalid (empty classes, bad values).
    #[error("invalid model artifact: {detail}")]
    InvalidArtifact {
        /// Description of the defect.
        detail: String,
    },

    /// A prediction failed at runtime.
    #[error("prediction failed: {reason}")]
    PredictionFailed {
        /// Why the classifier could not produce a label.
        reason: String,
    },
}

impl ModelError {
    /// Load-time failures are fatal; runtime prediction failures are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::PredictionFailed { .. } => true,
            Self::Unavailable { .. }
            | Self::SchemaMismatch { .. }
            | Self::UnknownLabel { .. }
            | Self::InvalidArtifact { .. } => false,
        }
    }
}

/// Errors from alert delivery.
///
/// Delivery failures never roll back the alert state machine; the
/// dispatcher reports them and the session continues.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NotifyError {
    /// The notifier backend rejected or failed the delivery.
    #[error("alert delivery failed: {reason}")]
    Delivery {
        /// Backend-specific failure description.
        reason: String,
    },
}

impl NotifyError {
    /// Notifier errors are always recoverable for the pipeline.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }
}

/// Errors from the sample source.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SourceError {
    /// The underlying stream failed.
    #[error("sample source I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source could not be opened.
    #[error("failed to open sample source '{path}': {source}")]
    Open {
        /// Path or description of the source.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl SourceError {
    /// Source failures terminate the session; individual malformed lines
    /// are handled by the codec and never surface here.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        false
    }
}

/// Top-level error type for a monitoring session.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MonitorError {
    /// Classifier artifact error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Sample source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// The snapshot log could not be created at session start.
    #[error("failed to create snapshot log '{path}': {source}")]
    LogCreate {
        /// Log file path.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Calibration capture failed to create or write its output CSV.
    #[error("calibration capture to '{path}' failed: {source}")]
    Capture {
        /// Output CSV path.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A session is already running.
    #[error("a monitoring session is already active")]
    AlreadyActive,
}

impl MonitorError {
    /// Whether the session can continue after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Model(e) => e.is_recoverable(),
            Self::Source(e) => e.is_recoverable(),
            Self::LogCreate { .. } | Self::Capture { .. } | Self::AlreadyActive => false,
        }
    }
}
