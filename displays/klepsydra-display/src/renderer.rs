//! Status screen renderer
//!
//! Lays out the drain timer state on the 20x4 screen:
//!
//! ```text
//! ┌────────────────────┐
//! │Drain relay: ON     │
//! │Phase   2d  0:00:00 │
//! │Elapsed 0d  1:02:03 │
//! │Remain  1d 22:57:57 │
//! └────────────────────┘
//! ```

use heapless::String;
use klepsydra_core::duration::write_duration;
use klepsydra_core::scheduler::DutyCycle;
use klepsydra_core::Millis;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{Screen, LINE_LEN};

/// Row holding the relay state
pub const ROW_STATE: usize = 0;
/// Row holding the current phase length
pub const ROW_PHASE: usize = 1;
/// Row holding the time spent in the current phase
pub const ROW_ELAPSED: usize = 2;
/// Row holding the time left in the current phase
pub const ROW_REMAINING: usize = 3;

/// Renders scheduler state into a [`Screen`]
pub struct StatusRenderer {
    screen: Screen,
}

impl StatusRenderer {
    /// Create a renderer with an empty screen
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Lay out the status screen for the scheduler state at `now`
    pub fn render(&mut self, cycle: &DutyCycle, now: Millis) {
        let state = if cycle.phase().is_active() {
            "Drain relay: ON"
        } else {
            "Drain relay: OFF"
        };
        self.screen.set_line(ROW_STATE, state);

        self.render_duration(ROW_PHASE, "Phase   ", cycle.current_phase_duration());
        self.render_duration(ROW_ELAPSED, "Elapsed ", cycle.elapsed(now));
        self.render_duration(ROW_REMAINING, "Remain  ", countdown(cycle.remaining(now)));
    }

    /// Push the screen to a display if anything changed
    pub fn flush_to<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<bool, DisplayError> {
        self.screen.render_to(backend)
    }

    /// Replace the status layout with a message until the next `render`
    pub fn show_message(&mut self, title: &str, detail: &str) {
        render_message(&mut self.screen, title, detail);
    }

    /// Force the next flush to redraw every row
    pub fn invalidate(&mut self) {
        self.screen.mark_dirty();
    }

    fn render_duration(&mut self, row: usize, label: &str, milliseconds: Millis) {
        let mut line: String<LINE_LEN> = String::new();
        let _ = line.push_str(label);
        let _ = write_duration(&mut line, milliseconds);
        self.screen.set_line(row, &line);
    }
}

impl Default for StatusRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a remaining time up to the next whole second
///
/// Elapsed time is truncated, so rounding the countdown up keeps the two
/// rows summing to the phase length and ticking over at the same instant.
fn countdown(remaining: Millis) -> Millis {
    remaining.saturating_add(999)
}

/// Render a one-off message (boot banner, faults) across the screen
pub fn render_message(screen: &mut Screen, title: &str, detail: &str) {
    screen.clear();
    screen.set_line(0, title);
    screen.set_line(2, detail);
}
