//! Adaptive smoothing window.
//!
//! The window trades responsiveness for noise rejection based on motion:
//! an abrupt tilt change (sit-to-stand, a reach) collapses the window to
//! its small Fast capacity so the change is not smeared across a long
//! history, while stable posture widens it to the Slow capacity for
//! stronger jitter suppression. The mode is re-evaluated on every sample,
//! not only at buffer-full boundaries.

use std::collections::VecDeque;

use spineguard_core::FeatureVector;

/// Current window capacity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Small window; quick reaction after abrupt tilt changes.
    Fast,
    /// Large window; stronger smoothing while posture is stable.
    Slow,
}

/// Configuration for the adaptive window.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Capacity while in [`WindowMode::Fast`].
    pub fast_size: usize,
    /// Capacity while in [`WindowMode::Slow`].
    pub slow_size: usize,
    /// Tilt delta (degrees) between consecutive samples that selects Fast.
    pub tilt_threshold_deg: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            fast_size: 2,
            slow_size: 4,
            tilt_threshold_deg: 15.0,
        }
    }
}

/// Bounded rolling buffer of feature vectors with tilt-driven capacity.
///
/// Invariant: the buffer never holds more entries than the current mode's
/// capacity, and an averaged vector is emitted exactly when it holds that
/// many.
pub struct AdaptiveWindow {
    buf: VecDeque<FeatureVector>,
    mode: WindowMode,
    prev_tilt: Option<f64>,
    config: WindowConfig,
}

impl AdaptiveWindow {
    /// Create a window with the given configuration.
    ///
    /// Degenerate capacities are clamped: `fast_size` to at least 1 and
    /// `slow_size` to at least `fast_size`.
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        let config = WindowConfig {
            fast_size: config.fast_size.max(1),
            slow_size: config.slow_size.max(config.fast_size.max(1)),
            ..config
        };
        Self {
            buf: VecDeque::with_capacity(config.slow_size),
            mode: WindowMode::Slow,
            prev_tilt: None,
            config,
        }
    }

    /// Create a window with default capacities (Fast 2, Slow 4, 15 deg).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(WindowConfig::default())
    }

    /// Push one feature vector; returns the element-wise mean of the
    /// buffer when it is exactly full, `None` while still warming.
    ///
    /// Shrinking to Fast retains only the newest entries; the buffer is
    /// never reset to empty by a mode switch.
    pub fn push(&mut self, features: FeatureVector) -> Option<FeatureVector> {
        self.mode = match self.prev_tilt {
            Some(prev) if (features.tilt_angle - prev).abs() > self.config.tilt_threshold_deg => {
                WindowMode::Fast
            }
            _ => WindowMode::Slow,
        };
        self.prev_tilt = Some(features.tilt_angle);

        let capacity = self.capacity();
        while self.buf.len() > capacity {
            self.buf.pop_front();
        }
        if self.buf.len() == capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(features);

        if self.buf.len() == capacity {
            Some(self.mean())
        } else {
            None
        }
    }

    fn mean(&self) -> FeatureVector {
        let mut sums = [0.0; 9];
        for fv in &self.buf {
            for (sum, value) in sums.iter_mut().zip(fv.as_array()) {
                *sum += value;
            }
        }
        let n = self.buf.len() as f64;
        for sum in &mut sums {
            *sum /= n;
        }
        FeatureVector::from_array(sums)
    }

    /// Capacity of the current mode.
    #[must_use]
    pub fn capacity(&self) -> usize {
        match self.mode {
            WindowMode::Fast => self.config.fast_size,
            WindowMode::Slow => self.config.slow_size,
        }
    }

    /// Current capacity mode.
    #[must_use]
    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Number of buffered feature vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Clear all buffered state, returning to Slow mode with no tilt
    /// history.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.mode = WindowMode::Slow;
        self.prev_tilt = None;
    }
}
