//! Schedule configuration
//!
//! The schedule is fixed at build time in the firmware, but the durations
//! are described by a plain config struct so host tooling and the build
//! script share one definition of "valid".

use klepsydra_hal::Millis;

use crate::duration::MAX_DURATION_MS;
use crate::scheduler::{Schedule, ScheduleError, DEFAULT_HIGH_MS, DEFAULT_LOW_MS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two-phase schedule durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleConfig {
    /// Relay-off duration
    pub low_ms: Millis,
    /// Relay-on duration
    pub high_ms: Millis,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            low_ms: DEFAULT_LOW_MS,
            high_ms: DEFAULT_HIGH_MS,
        }
    }
}

impl ScheduleConfig {
    /// Validate and build the schedule table
    pub fn build(&self) -> Result<Schedule, ScheduleError> {
        Schedule::new(self.low_ms, self.high_ms)
    }

    /// Whether either phase is too long for the countdown to render exactly
    ///
    /// Longer phases still run; the display just pins at the ten-day cap.
    pub fn exceeds_display_range(&self) -> bool {
        self.low_ms > MAX_DURATION_MS || self.high_ms > MAX_DURATION_MS
    }
}

impl TryFrom<ScheduleConfig> for Schedule {
    type Error = ScheduleError;

    fn try_from(config: ScheduleConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}
