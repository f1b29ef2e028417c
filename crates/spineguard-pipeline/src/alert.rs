//! Alert hysteresis state machine.
//!
//! Tracks runs of consecutive debounced labels and toggles between `Idle`
//! and `Alerting` with asymmetric thresholds, so a brief slouch does not
//! fire and a brief correction does not resolve. The machine is pure: it
//! emits typed [`AlertEvent`]s and leaves delivery to a dispatcher.

use spineguard_core::{AlertEvent, PostureLabel};

/// Thresholds for firing and resolving alerts.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Consecutive bad debounced labels required to fire.
    pub bad_trigger_threshold: u32,
    /// Consecutive good debounced labels required to resolve.
    pub good_resolve_threshold: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            bad_trigger_threshold: 20,
            good_resolve_threshold: 5,
        }
    }
}

/// Whether an alert is currently outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// No alert outstanding.
    Idle,
    /// An alert has fired and has not yet resolved.
    Alerting,
}

/// Hysteresis tracker over debounced posture labels.
///
/// Invariant: [`AlertEvent::Fired`] cannot be emitted twice without an
/// intervening [`AlertEvent::Resolved`], and vice versa.
pub struct AlertMachine {
    state: AlertState,
    consecutive_bad: u32,
    consecutive_good: u32,
    config: AlertConfig,
}

impl AlertMachine {
    /// Create a machine in the `Idle` state.
    #[must_use]
    pub fn new(config: AlertConfig) -> Self {
        Self {
            state: AlertState::Idle,
            consecutive_bad: 0,
            consecutive_good: 0,
            config,
        }
    }

    /// Create a machine with default thresholds (fire 20, resolve 5).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(AlertConfig::default())
    }

    /// Feed one debounced label; returns the transition event, if any.
    pub fn observe(&mut self, label: PostureLabel) -> Option<AlertEvent> {
        match label {
            PostureLabel::Bad => {
                self.consecutive_bad += 1;
                self.consecutive_good = 0;
                if self.state == AlertState::Idle
                    && self.consecutive_bad >= self.config.bad_trigger_threshold
                {
                    self.state = AlertState::Alerting;
                    self.consecutive_bad = 0;
                    return Some(AlertEvent::Fired);
                }
            }
            PostureLabel::Good => {
                self.consecutive_good += 1;
                self.consecutive_bad = 0;
                if self.state == AlertState::Alerting
                    && self.consecutive_good >= self.config.good_resolve_threshold
                {
                    self.state = AlertState::Idle;
                    return Some(AlertEvent::Resolved);
                }
            }
        }
        None
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Whether an alert is outstanding.
    #[must_use]
    pub fn is_alerting(&self) -> bool {
        self.state == AlertState::Alerting
    }

    /// Current run of consecutive bad labels.
    #[must_use]
    pub fn consecutive_bad(&self) -> u32 {
        self.consecutive_bad
    }

    /// Current run of consecutive good labels.
    #[must_use]
    pub fn consecutive_good(&self) -> u32 {
        self.consecutive_good
    }

    /// Return to `Idle` with zeroed counters.
    pub fn reset(&mut self) {
        self.state = AlertState::Idle;
        self.consecutive_bad = 0;
        self.consecutive_good = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PostureLabel::{Bad, Good};

    fn run(machine: &mut AlertMachine, label: PostureLabel, n: u32) -> Vec<AlertEvent> {
        (0..n).filter_map(|_| machine.observe(label)).collect()
    }

    #[test]
    fn fires_once_after_threshold() {
        let mut machine = AlertMachine::with_defaults();
        let events = run(&mut machine, Bad, 20);
        assert_eq!(events, vec![AlertEvent::Fired]);
        assert!(machine.is_alerting());
    }

    #[test]
    fn does_not_fire_below_threshold() {
        let mut machine = AlertMachine::with_defaults();
        let events = run(&mut machine, Bad, 19);
        assert!(events.is_empty());
        assert_eq!(machine.state(), AlertState::Idle);
    }

    #[test]
    fn no_duplicate_fire_while_alerting() {
        let mut machine = AlertMachine::with_defaults();
        run(&mut machine, Bad, 20);
        // Another long run of bad labels must not fire again.
        let events = run(&mut machine, Bad, 40);
        assert!(events.is_empty(), "already alerting: {events:?}");
    }

    #[test]
    fn good_run_interrupts_bad_count() {
        let mut machine = AlertMachine::with_defaults();
        run(&mut machine, Bad, 19);
        machine.observe(Good);
        assert_eq!(machine.consecutive_bad(), 0);
        // The run starts over; 19 more bads still do not fire.
        let events = run(&mut machine, Bad, 19);
        assert!(events.is_empty());
        assert_eq!(run(&mut machine, Bad, 1), vec![AlertEvent::Fired]);
    }

    #[test]
    fn resolves_once_after_good_run() {
        let mut machine = AlertMachine::with_defaults();
        run(&mut machine, Bad, 20);
        let events = run(&mut machine, Good, 5);
        assert_eq!(events, vec![AlertEvent::Resolved]);
        assert_eq!(machine.state(), AlertState::Idle);
    }

    #[test]
    fn no_resolve_while_idle() {
        let mut machine = AlertMachine::with_defaults();
        let events = run(&mut machine, Good, 50);
        assert!(events.is_empty(), "idle machine must not resolve");
    }

    #[test]
    fn fire_resolve_fire_cycle() {
        let mut machine = AlertMachine::new(AlertConfig {
            bad_trigger_threshold: 3,
            good_resolve_threshold: 2,
        });
        assert_eq!(run(&mut machine, Bad, 3), vec![AlertEvent::Fired]);
        assert_eq!(run(&mut machine, Good, 2), vec![AlertEvent::Resolved]);
        assert_eq!(run(&mut machine, Bad, 3), vec![AlertEvent::Fired]);
    }

    #[test]
    fn events_strictly_alternate() {
        let mut machine = AlertMachine::new(AlertConfig {
            bad_trigger_threshold: 2,
            good_resolve_threshold: 2,
        });
        let labels = [
            Bad, Bad, Bad, Good, Bad, Bad, Good, Good, Bad, Good, Bad, Bad, Good, Good, Good,
        ];
        let mut last: Option<AlertEvent> = None;
        for label in labels {
            if let Some(event) = machine.observe(label) {
                assert_ne!(Some(event), last, "events must alternate");
                last = Some(event);
            }
        }
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut machine = AlertMachine::with_defaults();
        run(&mut machine, Bad, 20);
        machine.reset();
        assert_eq!(machine.state(), AlertState::Idle);
        assert_eq!(machine.consecutive_bad(), 0);
        assert_eq!(machine.consecutive_good(), 0);
    }
}
