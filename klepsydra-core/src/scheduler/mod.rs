//! Duty-cycle scheduler
//!
//! Alternates the relay between a low and a high phase according to a fixed
//! two-entry schedule, measured against a wrapping millisecond clock.

pub mod duty_cycle;
pub mod phase;

pub use duty_cycle::{DutyCycle, Switch};
pub use phase::{Phase, Schedule, ScheduleError, DEFAULT_HIGH_MS, DEFAULT_LOW_MS};
