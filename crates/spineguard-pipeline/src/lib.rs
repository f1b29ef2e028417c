//! # spineguard-pipeline
//!
//! The streaming core of the SpineGuard posture monitor: every stage
//! between a raw sample line and a debounced, alert-checked posture tick.
//!
//! Stages, in processing order:
//!
//! 1. [`parse::parse_sample_line`] -- line codec for the firmware's 6- and
//!    7-field encodings
//! 2. [`features::extract`] -- 6-axis reading to 9-d feature vector
//! 3. [`window::AdaptiveWindow`] -- tilt-driven Fast/Slow smoothing window
//! 4. the injected [`Classifier`](spineguard_core::Classifier) port
//! 5. [`vote::VoteSmoother`] -- majority-vote debouncing
//! 6. [`alert::AlertMachine`] -- hysteresis alert state machine
//! 7. [`logger::SnapshotLogger`] -- interval-gated CSV audit log
//!
//! [`orchestrator::PosturePipeline`] wires the stages into one
//! `process_line` call; the async session runtime lives in
//! `spineguard-monitor`.

pub mod alert;
pub mod features;
pub mod logger;
pub mod orchestrator;
pub mod parse;
pub mod vote;
pub mod window;

pub use alert::{AlertConfig, AlertMachine, AlertState};
pub use features::extract;
pub use logger::SnapshotLogger;
pub use orchestrator::{PipelineConfig, PosturePipeline, PostureTick};
pub use parse::parse_sample_line;
pub use vote::VoteSmoother;
pub use window::{AdaptiveWindow, WindowConfig, WindowMode};
