//! Alert delivery adapters.
//!
//! The alert machine emits typed transitions; a notifier turns them into
//! something a person notices. The CLI uses [`LogNotifier`], which
//! reports through the tracing pipeline; push or beeper backends slot in
//! behind the same port.

use tracing::{info, warn};

use spineguard_core::{AlertEvent, AlertNotifier, NotifyError};

/// Notifier that emits alert transitions as structured tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Create a log-backed notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AlertNotifier for LogNotifier {
    fn notify(&self, event: AlertEvent) -> Result<(), NotifyError> {
        match event {
            AlertEvent::Fired => warn!(message = event.message(), "posture alert"),
            AlertEvent::Resolved => info!(message = event.message(), "posture alert resolved"),
        }
        Ok(())
    }
}
