//! Adapter from `embedded-hal` digital outputs to the Klepsydra HAL
//!
//! Lets any chip HAL pin (embassy-rp `Output`, linux-embedded-hal, ...)
//! drive a relay without a board-specific wrapper.

use embedded_hal::digital::OutputPin as EhOutputPin;
use klepsydra_hal::OutputPin;

/// `embedded-hal` output pin wrapped for [`klepsydra_hal::OutputPin`]
///
/// The commanded level is tracked locally. Pin write errors cannot be
/// reported back through the HAL trait, so they are counted instead.
pub struct HalPin<P> {
    pin: P,
    high: bool,
    errors: u32,
}

impl<P: EhOutputPin> HalPin<P> {
    /// Wrap a pin whose current level is `initially_high`
    pub fn new(pin: P, initially_high: bool) -> Self {
        Self {
            pin,
            high: initially_high,
            errors: 0,
        }
    }

    /// Number of failed pin writes since creation
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin> OutputPin for HalPin<P> {
    fn set_high(&mut self) {
        if self.pin.set_high().is_err() {
            self.errors = self.errors.saturating_add(1);
        }
        self.high = true;
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_err() {
            self.errors = self.errors.saturating_add(1);
        }
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct RecordingPin {
        level: bool,
    }

    impl ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl EhOutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.level = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.level = true;
            Ok(())
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl EhOutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_forwards_levels() {
        let mut pin = HalPin::new(RecordingPin { level: false }, false);

        pin.set_state(true);
        assert!(pin.is_set_high());
        assert_eq!(pin.error_count(), 0);

        pin.set_low();
        assert!(pin.is_set_low());
        assert!(!pin.into_inner().level);
    }

    #[test]
    fn test_counts_write_errors() {
        let mut pin = HalPin::new(BrokenPin, false);
        pin.set_high();
        pin.set_low();
        assert_eq!(pin.error_count(), 2);
    }
}
