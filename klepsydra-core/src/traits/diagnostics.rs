//! Diagnostic line sink
//!
//! Switch records are written as single human-readable text lines, the way
//! they would appear on a serial monitor.

use core::fmt::{self, Write};

use heapless::String;

/// Longest diagnostic line, in bytes
pub const LINE_CAPACITY: usize = 96;

/// Trait for a line-oriented text sink (serial port, log buffer, ...)
pub trait DiagnosticSink {
    /// Write one line of text
    ///
    /// `line` carries no terminator; the sink appends its own.
    fn write_line(&mut self, line: &str);

    /// Format a record into a line buffer and write it
    ///
    /// Text beyond [`LINE_CAPACITY`] is dropped.
    fn write_record(&mut self, record: &dyn fmt::Display) {
        let mut line: String<LINE_CAPACITY> = String::new();
        let _ = write!(line, "{}", record);
        self.write_line(&line);
    }
}

/// Sink that discards everything
impl DiagnosticSink for () {
    fn write_line(&mut self, _line: &str) {}
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}
