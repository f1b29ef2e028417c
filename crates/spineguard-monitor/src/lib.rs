//! # spineguard-monitor
//!
//! Async runtime for the SpineGuard posture monitor:
//!
//! - [`SampleSource`] -- file, stdin, and reader-backed line sources
//! - [`MonitorSession`] / [`MonitorHandle`] -- the background monitoring
//!   task, its watch-backed status cell, and cooperative stop
//! - [`Monitor`] -- owner of at most one running session
//! - [`calibrate::capture`] -- labeled sample capture for the trainer
//! - [`Cli`] -- the `spineguard` binary's command surface

pub mod calibrate;
pub mod cli;
pub mod notify;
pub mod session;
pub mod source;

pub use cli::{Cli, Commands};
pub use notify::LogNotifier;
pub use session::{Monitor, MonitorHandle, MonitorSession, SessionConfig};
pub use source::SampleSource;
