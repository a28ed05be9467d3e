//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;
use klepsydra_core::text::truncate;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the 20x4 LCD
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on the 20x4 LCD
pub const SCREEN_COLS: usize = 20;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for text-mode displays
///
/// Holds the desired content of every row and remembers whether anything
/// changed since it was last pushed to a [`DisplayBackend`].
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.dirty = true;
    }

    /// Set the content of a specific row
    ///
    /// Text longer than the row is truncated. Rewriting a row with the text
    /// it already holds does not mark the screen dirty.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        let text = truncate(text, LINE_LEN);
        if line.as_str() == text {
            return;
        }

        line.clear();
        let _ = line.push_str(text);
        self.dirty = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Push the buffer to a display if it changed
    ///
    /// Every row is written padded to the full width so stale characters
    /// are overwritten without a flickering clear. Returns whether anything
    /// was drawn.
    pub fn render_to<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<bool, DisplayError> {
        if !self.dirty {
            return Ok(false);
        }

        for (row, line) in self.lines.iter().enumerate() {
            let mut padded: String<LINE_LEN> = String::new();
            let _ = padded.push_str(line);
            while padded.push(' ').is_ok() {}
            backend.draw_text(row as u8, 0, &padded)?;
        }
        backend.flush()?;

        self.dirty = false;
        Ok(true)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
