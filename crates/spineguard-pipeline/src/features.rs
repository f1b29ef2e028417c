//! Feature extraction.
//!
//! Maps one raw 6-axis reading to the 9-dimensional feature vector the
//! classifier was trained on: the six axes plus accelerometer magnitude,
//! gyroscope magnitude, and tilt angle in degrees.

use spineguard_core::{FeatureVector, RawSample, SampleError};

/// Derive the feature vector for one sample.
///
/// Pure and stateless. The tilt angle is `atan2(sqrt(ax^2 + ay^2), az)`
/// converted to degrees: 0 when the acceleration vector is aligned with
/// the device's vertical axis, 90 when perpendicular to it.
///
/// # Errors
///
/// Returns [`SampleError::NonFinite`] naming the first NaN or infinite
/// axis value; the caller discards the sample.
pub fn extract(sample: &RawSample) -> Result<FeatureVector, SampleError> {
    let fields = [
        ("ax", sample.ax),
        ("ay", sample.ay),
        ("az", sample.az),
        ("gx", sample.gx),
        ("gy", sample.gy),
        ("gz", sample.gz),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(SampleError::NonFinite { field, value });
        }
    }

    let accel_mag = (sample.ax * sample.ax + sample.ay * sample.ay + sample.az * sample.az).sqrt();
    let gyro_mag = (sample.gx * sample.gx + sample.gy * sample.gy + sample.gz * sample.gz).sqrt();
    let horizontal = (sample.ax * sample.ax + sample.ay * sample.ay).sqrt();
    let tilt_angle = horizontal.atan2(sample.az).to_degrees();

    Ok(FeatureVector {
        ax: sample.ax,
        ay: sample.ay,
        az: sample.az,
        gx: sample.gx,
        gy: sample.gy,
        gz: sample.gz,
        accel_mag,
        gyro_mag,
        tilt_angle,
    })
}
