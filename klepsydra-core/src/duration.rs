//! Duration formatting for the character display
//!
//! Renders a millisecond count as `"<days>d <hh>:<mm>:<ss>"`, e.g.
//! `"1d  4:05:09"`. Hours are space-padded, minutes and seconds
//! zero-padded. Inputs are clamped to ten days so the text always fits the
//! fixed-width field.

use core::fmt;

use heapless::String;
use klepsydra_hal::Millis;

/// Largest rendered duration: 10 days
pub const MAX_DURATION_MS: Millis = 10 * 24 * 60 * 60 * 1000;

/// Width of the longest rendering, `"10d  0:00:00"`
pub const FORMATTED_LEN: usize = 12;

/// Fixed-capacity buffer holding a formatted duration
pub type FormattedDuration = String<FORMATTED_LEN>;

const SECONDS_PER_DAY: u32 = 86_400;

/// A duration split into days, hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hms {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Hms {
    /// Decompose a millisecond count, clamped to [`MAX_DURATION_MS`]
    ///
    /// Sub-second remainders are truncated.
    pub const fn from_millis(milliseconds: Millis) -> Self {
        let clamped = if milliseconds > MAX_DURATION_MS {
            MAX_DURATION_MS
        } else {
            milliseconds
        };
        let total_s = clamped / 1000;

        Self {
            days: total_s / SECONDS_PER_DAY,
            hours: (total_s / 3600) % 24,
            minutes: (total_s / 60) % 60,
            seconds: total_s % 60,
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:2}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// `Display` adapter for a raw millisecond count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmsDuration(pub Millis);

impl fmt::Display for HmsDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Hms::from_millis(self.0).fmt(f)
    }
}

/// Write a formatted duration into any text sink
pub fn write_duration<W: fmt::Write>(target: &mut W, milliseconds: Millis) -> fmt::Result {
    write!(target, "{}", HmsDuration(milliseconds))
}

/// Format a duration into a fixed-size buffer
///
/// The buffer is sized for the clamped worst case, so the text is never
/// truncated.
pub fn format_duration(milliseconds: Millis) -> FormattedDuration {
    let mut text = FormattedDuration::new();
    let _ = write_duration(&mut text, milliseconds);
    text
}
