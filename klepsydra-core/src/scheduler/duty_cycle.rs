//! Drift-free duty-cycle scheduler
//!
//! Tracks the current phase and the instant it started (the anchor). On a
//! boundary crossing the anchor advances by the nominal phase duration, not
//! to the time of the tick, so polling latency never accumulates across
//! cycles.

use core::fmt;

use klepsydra_hal::Millis;

use super::phase::{Phase, Schedule};

/// Record of a single phase switch
///
/// Produced by [`DutyCycle::tick`] whenever a boundary is crossed. All
/// fields describe the state *after* the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Switch {
    /// Clock reading of the tick that detected the crossing
    pub now: Millis,
    /// Start instant of the new phase
    pub anchor: Millis,
    /// Phase entered
    pub phase: Phase,
    /// Duration of the new phase
    pub duration: Millis,
    /// Expected end of the new phase (`anchor + duration`, wrapping)
    pub next_boundary: Millis,
}

impl Switch {
    /// How far the tick lagged behind the ideal boundary
    pub const fn latency(&self) -> Millis {
        self.now.wrapping_sub(self.anchor)
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\tanchor {}\tnext + {}\t= {}",
            self.now, self.anchor, self.duration, self.next_boundary
        )
    }
}

/// Duty-cycle scheduler state
///
/// Owned by a single controller; all mutation goes through `&mut self`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCycle {
    /// Phase duration table
    schedule: Schedule,
    /// Instant the current phase began
    anchor: Millis,
    /// Current phase
    phase: Phase,
}

impl DutyCycle {
    /// Start a new cycle in the low phase, anchored at `now`
    pub const fn new(schedule: Schedule, now: Millis) -> Self {
        Self {
            schedule,
            anchor: now,
            phase: Phase::Low,
        }
    }

    /// Restart the cycle from the low phase, anchored at `now`
    pub fn restart(&mut self, now: Millis) {
        self.anchor = now;
        self.phase = Phase::Low;
    }

    /// Advance the schedule to `now`
    ///
    /// Switches phase when the time since the anchor strictly exceeds the
    /// current phase duration. At most one switch happens per call, even if
    /// `now` lies several boundaries ahead; later calls take the remaining
    /// steps one at a time.
    pub fn tick(&mut self, now: Millis) -> Option<Switch> {
        let duration = self.current_phase_duration();
        if self.elapsed(now) <= duration {
            return None;
        }

        self.anchor = self.anchor.wrapping_add(duration);
        self.phase = self.phase.toggled();

        let duration = self.current_phase_duration();
        Some(Switch {
            now,
            anchor: self.anchor,
            phase: self.phase,
            duration,
            next_boundary: self.anchor.wrapping_add(duration),
        })
    }

    /// Duration of the current phase
    pub const fn current_phase_duration(&self) -> Millis {
        self.schedule.duration(self.phase)
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Start instant of the current phase
    pub const fn anchor(&self) -> Millis {
        self.anchor
    }

    /// Phase duration table
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Time spent in the current phase, correct across clock wraparound
    pub const fn elapsed(&self, now: Millis) -> Millis {
        now.wrapping_sub(self.anchor)
    }

    /// Time left in the current phase (zero once the boundary has passed)
    pub const fn remaining(&self, now: Millis) -> Millis {
        self.current_phase_duration()
            .saturating_sub(self.elapsed(now))
    }

    /// Expected end of the current phase
    pub const fn next_boundary(&self) -> Millis {
        self.anchor.wrapping_add(self.current_phase_duration())
    }
}
