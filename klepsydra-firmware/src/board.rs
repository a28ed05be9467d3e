//! Board glue for RP2040 drain timer boards
//!
//! Pin map:
//!
//! | Function        | GPIO |
//! |-----------------|------|
//! | UART0 TX / RX   | 0 / 1 |
//! | Relay 1 (drain) | 4    |
//! | Relay 2..4      | 5..7 |
//! | I2C0 SDA / SCL  | 20 / 21 |

use embassy_time::Instant;
use klepsydra_hal::{Millis, MonotonicClock, UartTx};

/// Number of relay channels on the board
pub const RELAY_CHANNELS: usize = 4;

/// Millisecond clock backed by the embassy time driver
#[derive(Clone, Copy)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_millis(&self) -> Millis {
        // Keep the low 32 bits; they wrap like a hardware millisecond counter
        Instant::now().as_millis() as Millis
    }
}

/// Blocking serial transmitter for the diagnostic log
pub struct SerialPort<W> {
    inner: W,
}

impl<W: embedded_io::Write> SerialPort<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: embedded_io::Write> UartTx for SerialPort<W> {
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}
