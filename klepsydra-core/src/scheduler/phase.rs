//! Duty phases and the two-entry schedule table

use klepsydra_hal::Millis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference duration of the low (relay off) phase: 10 seconds
pub const DEFAULT_LOW_MS: Millis = 10 * 1000;

/// Reference duration of the high (relay on) phase: 2 days
pub const DEFAULT_HIGH_MS: Millis = 2 * 24 * 60 * 60 * 1000;

/// Duty phase
///
/// The controller alternates strictly between the two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Relay off (output inactive)
    #[default]
    Low,
    /// Relay on (output active)
    High,
}

impl Phase {
    /// The other phase
    pub const fn toggled(self) -> Self {
        match self {
            Phase::Low => Phase::High,
            Phase::High => Phase::Low,
        }
    }

    /// Whether the relay output is driven active in this phase
    pub const fn is_active(self) -> bool {
        matches!(self, Phase::High)
    }

    /// Binary state index (0 = low, 1 = high)
    pub const fn index(self) -> u8 {
        match self {
            Phase::Low => 0,
            Phase::High => 1,
        }
    }
}

/// Errors from schedule construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleError {
    /// A phase was given a zero duration
    ZeroDuration(Phase),
}

/// Phase duration table
///
/// Immutable once built; every duration is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Schedule {
    low_ms: Millis,
    high_ms: Millis,
}

impl Schedule {
    /// Reference drain schedule (10 s closed, 2 days open)
    pub const DEFAULT: Self = Self {
        low_ms: DEFAULT_LOW_MS,
        high_ms: DEFAULT_HIGH_MS,
    };

    /// Build a schedule from the low and high phase durations
    pub const fn new(low_ms: Millis, high_ms: Millis) -> Result<Self, ScheduleError> {
        if low_ms == 0 {
            return Err(ScheduleError::ZeroDuration(Phase::Low));
        }
        if high_ms == 0 {
            return Err(ScheduleError::ZeroDuration(Phase::High));
        }
        Ok(Self { low_ms, high_ms })
    }

    /// Duration of the given phase in milliseconds
    pub const fn duration(&self, phase: Phase) -> Millis {
        match phase {
            Phase::Low => self.low_ms,
            Phase::High => self.high_ms,
        }
    }

    /// Length of one full low + high cycle
    ///
    /// Saturates rather than wrapping for schedules longer than the clock range.
    pub const fn cycle_ms(&self) -> Millis {
        self.low_ms.saturating_add(self.high_ms)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::DEFAULT
    }
}
