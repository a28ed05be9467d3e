//! Monotonic clock abstraction
//!
//! The controller only ever needs "milliseconds since some fixed instant".
//! The counter is 32 bits wide and wraps after ~49.7 days; consumers must
//! compute intervals with wrapping subtraction.

/// Millisecond clock reading
pub type Millis = u32;

/// Free-running millisecond clock
pub trait MonotonicClock {
    /// Read the current time in milliseconds
    ///
    /// The value increases monotonically and wraps around at `u32::MAX`.
    fn now_millis(&self) -> Millis;

    /// Milliseconds elapsed since `since`, correct across one wraparound
    fn millis_since(&self, since: Millis) -> Millis {
        self.now_millis().wrapping_sub(since)
    }
}
