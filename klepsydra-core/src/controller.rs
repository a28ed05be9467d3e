//! Drain valve controller
//!
//! Couples the duty-cycle scheduler to a relay output and a diagnostic
//! sink. The firmware control loop owns exactly one controller and calls
//! [`DrainController::tick`] on every iteration.

use klepsydra_hal::Millis;

use crate::scheduler::{DutyCycle, Phase, Schedule, Switch};
use crate::traits::{DiagnosticSink, RelayOutput};

/// Drain valve controller
///
/// After any call, the relay is energized exactly when the scheduler is in
/// the high phase.
pub struct DrainController<R, D> {
    cycle: DutyCycle,
    relay: R,
    diagnostics: D,
    /// Set on every phase switch, cleared by the display refresh
    state_changed: bool,
}

impl<R: RelayOutput, D: DiagnosticSink> DrainController<R, D> {
    /// Create a controller and start the schedule at `now`
    ///
    /// The relay is released immediately.
    pub fn new(schedule: Schedule, relay: R, diagnostics: D, now: Millis) -> Self {
        let mut controller = Self {
            cycle: DutyCycle::new(schedule, now),
            relay,
            diagnostics,
            state_changed: true,
        };
        controller.relay.set_active(false);
        controller
    }

    /// Release the relay and restart from the low phase at `now`
    pub fn initialize(&mut self, now: Millis) {
        self.relay.set_active(false);
        self.cycle.restart(now);
        self.state_changed = true;
    }

    /// Advance the schedule to `now`
    ///
    /// On a phase switch the relay follows the new phase and the switch
    /// record is written to the diagnostic sink.
    pub fn tick(&mut self, now: Millis) -> Option<Switch> {
        let switch = self.cycle.tick(now)?;

        self.relay.set_active(switch.phase.is_active());
        self.diagnostics.write_record(&switch);
        self.state_changed = true;

        Some(switch)
    }

    /// Read and clear the "phase changed" flag
    pub fn take_state_changed(&mut self) -> bool {
        core::mem::replace(&mut self.state_changed, false)
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.cycle.phase()
    }

    /// Duration of the current phase
    pub fn current_phase_duration(&self) -> Millis {
        self.cycle.current_phase_duration()
    }

    /// Scheduler state (for display)
    pub fn scheduler(&self) -> &DutyCycle {
        &self.cycle
    }

    /// Relay output
    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Diagnostic sink
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{String, Vec};
    use proptest::prelude::*;

    use crate::traits::LINE_CAPACITY;

    /// Mock relay that counts writes
    struct MockRelay {
        active: bool,
        writes: u32,
    }

    impl MockRelay {
        fn new(active: bool) -> Self {
            Self { active, writes: 0 }
        }
    }

    impl RelayOutput for MockRelay {
        fn set_active(&mut self, active: bool) {
            self.active = active;
            self.writes += 1;
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    /// Mock sink keeping the first few lines
    #[derive(Default)]
    struct MockLog {
        lines: Vec<String<LINE_CAPACITY>, 8>,
    }

    impl DiagnosticSink for MockLog {
        fn write_line(&mut self, line: &str) {
            let mut owned = String::new();
            let _ = owned.push_str(line);
            let _ = self.lines.push(owned);
        }
    }

    fn schedule() -> Schedule {
        Schedule::new(100, 500).unwrap()
    }

    #[test]
    fn test_new_releases_relay() {
        let controller = DrainController::new(schedule(), MockRelay::new(true), (), 0);
        assert!(!controller.relay().is_active());
        assert_eq!(controller.phase(), Phase::Low);
        assert_eq!(controller.current_phase_duration(), 100);
    }

    #[test]
    fn test_switch_drives_relay_and_logs() {
        let mut controller =
            DrainController::new(schedule(), MockRelay::new(false), MockLog::default(), 0);
        assert!(controller.take_state_changed());

        assert!(controller.tick(50).is_none());
        assert!(!controller.take_state_changed());
        assert!(controller.diagnostics().lines.is_empty());

        let switch = controller.tick(103).unwrap();
        assert_eq!(switch.phase, Phase::High);
        assert!(controller.relay().is_active());
        assert!(controller.take_state_changed());
        assert!(!controller.take_state_changed());
        assert_eq!(
            controller.diagnostics().lines[0].as_str(),
            "103\tanchor 100\tnext + 500\t= 600"
        );

        controller.tick(601).unwrap();
        assert!(!controller.relay().is_active());
        assert_eq!(controller.phase(), Phase::Low);
        assert_eq!(controller.diagnostics().lines.len(), 2);
    }

    #[test]
    fn test_relay_untouched_between_boundaries() {
        let mut controller = DrainController::new(schedule(), MockRelay::new(false), (), 0);
        let writes = controller.relay().writes;

        for now in 0..=100 {
            controller.tick(now);
        }
        assert_eq!(controller.relay().writes, writes);
    }

    #[test]
    fn test_initialize_restarts_low() {
        let mut controller = DrainController::new(schedule(), MockRelay::new(false), (), 0);
        controller.tick(101);
        assert!(controller.relay().is_active());
        controller.take_state_changed();

        controller.initialize(7_000);
        assert!(!controller.relay().is_active());
        assert_eq!(controller.phase(), Phase::Low);
        assert_eq!(controller.scheduler().anchor(), 7_000);
        assert!(controller.take_state_changed());
    }

    proptest! {
        #[test]
        fn prop_relay_follows_phase(
            start in any::<u32>(),
            steps in proptest::collection::vec(0u32..2_000, 1..300),
        ) {
            let mut controller = DrainController::new(schedule(), MockRelay::new(false), (), start);
            let mut now = start;
            let mut expected = Phase::Low;

            for step in steps {
                now = now.wrapping_add(step);
                if controller.tick(now).is_some() {
                    expected = expected.toggled();
                }
                prop_assert_eq!(controller.phase(), expected);
                prop_assert_eq!(controller.relay().is_active(), expected == Phase::High);
            }
        }
    }
}
