//! Serial diagnostic output
//!
//! Writes switch records to a UART, one CRLF-terminated line each, so they
//! can be watched from any serial terminal.

use klepsydra_core::traits::DiagnosticSink;
use klepsydra_hal::UartTx;

/// Line terminator expected by serial monitors
const LINE_END: &[u8] = b"\r\n";

/// [`DiagnosticSink`] over a UART transmitter
///
/// Transmit errors are counted, never propagated: losing a log line must
/// not stall the control loop.
pub struct UartDiagnostics<U> {
    uart: U,
    dropped_lines: u32,
}

impl<U: UartTx> UartDiagnostics<U> {
    /// Create a new serial sink
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            dropped_lines: 0,
        }
    }

    /// Number of lines that failed to transmit
    pub fn dropped_lines(&self) -> u32 {
        self.dropped_lines
    }

    /// Get access to the underlying UART
    pub fn uart(&self) -> &U {
        &self.uart
    }

    fn try_write(&mut self, line: &str) -> Result<(), U::Error> {
        self.uart.write_blocking(line.as_bytes())?;
        self.uart.write_blocking(LINE_END)?;
        self.uart.flush()
    }
}

impl<U: UartTx> DiagnosticSink for UartDiagnostics<U> {
    fn write_line(&mut self, line: &str) {
        if self.try_write(line).is_err() {
            self.dropped_lines = self.dropped_lines.saturating_add(1);
        }
    }
}
