//! Posture monitoring domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical feature field order.
///
/// The classifier artifact declares its training-time field order and the
/// loader verifies it against this list, so a model can never be invoked
/// with a reordered vector. The snapshot log header uses the same list.
pub const FEATURE_NAMES: [&str; 9] = [
    "ax",
    "ay",
    "az",
    "gx",
    "gy",
    "gz",
    "accel_mag",
    "gyro_mag",
    "tilt_angle",
];

/// One raw 6-axis inertial reading, as decoded from a sample-source line.
///
/// The optional timestamp is whatever the upstream firmware prepended; it is
/// carried for diagnostics only and takes no part in feature extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Upstream timestamp field, if the line carried one.
    pub timestamp: Option<f64>,
    /// Accelerometer axes (g).
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    /// Gyroscope axes (deg/s).
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
}

impl RawSample {
    /// Build a sample from the six axis values, without a timestamp.
    #[must_use]
    pub fn from_axes(ax: f64, ay: f64, az: f64, gx: f64, gy: f64, gz: f64) -> Self {
        Self {
            timestamp: None,
            ax,
            ay,
            az,
            gx,
            gy,
            gz,
        }
    }
}

/// The 9-dimensional feature vector derived from one [`RawSample`].
///
/// Field order is fixed and matches [`FEATURE_NAMES`]; the derived fields
/// are the accelerometer/gyroscope Euclidean norms and the tilt angle in
/// degrees between the sensed acceleration vector and the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
    pub accel_mag: f64,
    pub gyro_mag: f64,
    pub tilt_angle: f64,
}

impl FeatureVector {
    /// The vector as an array in canonical field order.
    #[must_use]
    pub fn as_array(&self) -> [f64; 9] {
        [
            self.ax,
            self.ay,
            self.az,
            self.gx,
            self.gy,
            self.gz,
            self.accel_mag,
            self.gyro_mag,
            self.tilt_angle,
        ]
    }

    /// Rebuild a vector from an array in canonical field order.
    #[must_use]
    pub fn from_array(values: [f64; 9]) -> Self {
        Self {
            ax: values[0],
            ay: values[1],
            az: values[2],
            gx: values[3],
            gy: values[4],
            gz: values[5],
            accel_mag: values[6],
            gyro_mag: values[7],
            tilt_angle: values[8],
        }
    }
}

/// Posture classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureLabel {
    /// Upright, correct posture.
    Good,
    /// Slouched or otherwise incorrect posture.
    Bad,
}

impl PostureLabel {
    /// Parse a label case-insensitively (`"good"`, `"GOOD"`, `"Bad"`, ...).
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("good") {
            Some(Self::Good)
        } else if text.eq_ignore_ascii_case("bad") {
            Some(Self::Bad)
        } else {
            None
        }
    }

    /// Lowercase rendering used in logs and status snapshots.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

impl fmt::Display for PostureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classifier verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted posture label.
    pub label: PostureLabel,
    /// Classifier confidence in `[0, 1]`, if the model reports one.
    pub confidence: Option<f64>,
}

/// Typed alert transition emitted by the hysteresis state machine.
///
/// The machine itself performs no side effects; a dispatcher hands these to
/// the configured notifier with at-least-once semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertEvent {
    /// Sustained bad posture crossed the trigger threshold.
    Fired,
    /// Sustained good posture crossed the resolve threshold.
    Resolved,
}

impl AlertEvent {
    /// Human-readable notification body for this transition.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Fired => "bad posture",
            Self::Resolved => "posture corrected",
        }
    }
}

/// Read-only monitoring status snapshot published to external readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Whether a monitoring session is currently running.
    pub active: bool,
    /// Most recent debounced posture.
    pub current_posture: PostureLabel,
}

impl Default for MonitorStatus {
    fn default() -> Self {
        Self {
            active: false,
            current_posture: PostureLabel::Good,
        }
    }
}
