//! Per-sample pipeline orchestrator.
//!
//! `PosturePipeline` connects the processing stages into a single step
//! per raw sample line: parse, feature extraction, adaptive windowing,
//! classification, vote smoothing, alert hysteresis, and snapshot
//! logging. All stage state lives here; the async session layer owns the
//! sample source and the published status cell.

use std::time::Instant;

use tracing::{debug, warn};

use spineguard_core::{
    AlertEvent, AlertNotifier, Classifier, FeatureVector, PostureLabel, Prediction,
};

use crate::alert::{AlertConfig, AlertMachine};
use crate::features::extract;
use crate::logger::SnapshotLogger;
use crate::parse::parse_sample_line;
use crate::vote::VoteSmoother;
use crate::window::{AdaptiveWindow, WindowConfig};

/// Configuration for the per-sample pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Adaptive window capacities and tilt threshold.
    pub window: WindowConfig,
    /// Majority-vote ring size.
    pub vote_buffer_size: usize,
    /// Alert hysteresis thresholds.
    pub alert: AlertConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            vote_buffer_size: 3,
            alert: AlertConfig::default(),
        }
    }
}

/// Outcome of one debounced tick (a full-window classification).
#[derive(Debug, Clone, Copy)]
pub struct PostureTick {
    /// Element-wise mean of the window that produced this tick.
    pub averaged: FeatureVector,
    /// Raw classifier verdict before vote smoothing.
    pub raw: Prediction,
    /// Debounced label after majority voting.
    pub debounced: PostureLabel,
    /// Alert transition emitted on this tick, if any.
    pub alert: Option<AlertEvent>,
    /// Whether a snapshot log row was written on this tick.
    pub logged: bool,
}

/// The complete streaming posture pipeline.
///
/// One `process_line` call walks a raw sample through every stage with
/// early-outs: undecodable or non-finite samples are discarded without
/// mutating state, and no classification happens until the window is
/// full. Recoverable stage failures are reported and skipped; nothing in
/// here terminates the loop.
pub struct PosturePipeline {
    window: AdaptiveWindow,
    votes: VoteSmoother,
    alerts: AlertMachine,
    logger: SnapshotLogger,
    classifier: Box<dyn Classifier>,
    notifier: Box<dyn AlertNotifier>,
    samples_seen: u64,
    ticks_emitted: u64,
}

impl PosturePipeline {
    /// Assemble a pipeline from its configuration and collaborators.
    ///
    /// The classifier must already be loaded and validated; the logger
    /// must already have been created (both are fail-fast concerns of
    /// session start, not of per-sample processing).
    #[must_use]
    pub fn new(
        config: PipelineConfig,
        classifier: Box<dyn Classifier>,
        notifier: Box<dyn AlertNotifier>,
        logger: SnapshotLogger,
    ) -> Self {
        let vote_buffer_size = if config.vote_buffer_size == 0 {
            3
        } else {
            config.vote_buffer_size
        };
        Self {
            window: AdaptiveWindow::new(config.window),
            votes: VoteSmoother::new(vote_buffer_size),
            alerts: AlertMachine::new(config.alert),
            logger,
            classifier,
            notifier,
            samples_seen: 0,
            ticks_emitted: 0,
        }
    }

    /// Process one raw sample line end to end.
    ///
    /// Returns `Some` when the window was full and a debounced tick was
    /// produced, `None` when the line was discarded or the window is
    /// still warming.
    pub fn process_line(&mut self, line: &str) -> Option<PostureTick> {
        self.samples_seen += 1;

        let Some(sample) = parse_sample_line(line) else {
            debug!(line, "discarding undecodable sample line");
            return None;
        };
        let features = match extract(&sample) {
            Ok(features) => features,
            Err(e) => {
                debug!(error = %e, "discarding sample");
                return None;
            }
        };
        self.process_features(features)
    }

    fn process_features(&mut self, features: FeatureVector) -> Option<PostureTick> {
        let averaged = self.window.push(features)?;

        let raw = match self.classifier.predict(&averaged) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(error = %e, "classifier produced no verdict, skipping tick");
                return None;
            }
        };

        let debounced = self.votes.push(raw.label);

        let alert = self.alerts.observe(debounced);
        if let Some(event) = alert {
            // The machine has already transitioned; delivery is
            // at-least-once and a failure never rolls it back.
            if let Err(e) = self.notifier.notify(event) {
                warn!(error = %e, event = ?event, "alert delivery failed");
            }
        }

        let logged = self.logger.maybe_log(Instant::now(), &averaged, debounced);

        self.ticks_emitted += 1;
        Some(PostureTick {
            averaged,
            raw,
            debounced,
            alert,
            logged,
        })
    }

    /// Flush the snapshot log; called on session stop.
    pub fn flush(&mut self) {
        self.logger.flush();
    }

    /// Clear window, vote, and alert state.
    ///
    /// The snapshot log is untouched; a restart recreates the whole
    /// pipeline, log included.
    pub fn reset(&mut self) {
        self.window.reset();
        self.votes.reset();
        self.alerts.reset();
        self.samples_seen = 0;
        self.ticks_emitted = 0;
    }

    /// Whether an alert is currently outstanding.
    #[must_use]
    pub fn is_alerting(&self) -> bool {
        self.alerts.is_alerting()
    }

    /// Number of raw lines seen, decodable or not.
    #[must_use]
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Number of debounced ticks emitted.
    #[must_use]
    pub fn ticks_emitted(&self) -> u64 {
        self.ticks_emitted
    }

    /// Buffered window length, for diagnostics.
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Votes currently held in the smoothing ring, for diagnostics.
    #[must_use]
    pub fn votes_held(&self) -> usize {
        self.votes.len()
    }
}
