//! GPIO relay output
//!
//! Relay boards are driven directly from a GPIO pin. Many cheap
//! opto-isolated boards are active-low, so polarity is configurable.

use klepsydra_core::traits::RelayOutput;
use klepsydra_hal::OutputPin;

/// Relay driven by a single GPIO pin
///
/// The relay is released as soon as it is constructed.
pub struct GpioRelay<P> {
    pin: P,
    /// If true, relay ON = pin LOW
    inverted: bool,
    /// Current logical state (true = energized)
    active: bool,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Create a new relay output
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin driving the relay input
    /// - `inverted`: If true, the relay is energized when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut relay = Self {
            pin,
            inverted,
            active: false,
        };
        relay.set_active(false);
        relay
    }

    /// Create a relay with active-high input
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a relay with active-low input
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Get access to the underlying pin
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> RelayOutput for GpioRelay<P> {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        // active != inverted: normal on → high, inverted on → low
        self.pin.set_state(active != self.inverted);
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// A contiguous group of relay channels
///
/// Relay boards come in 2/4/8 channel variants; every channel is released
/// at start-up so unused relays never float, and only the first channel
/// carries the drain valve.
pub struct RelayBank<P, const N: usize> {
    channels: [GpioRelay<P>; N],
}

impl<P: OutputPin, const N: usize> RelayBank<P, N> {
    /// Take ownership of `N` relay pins and release all of them
    ///
    /// # Panics
    /// If `N` is zero.
    pub fn new(pins: [P; N], inverted: bool) -> Self {
        assert!(N > 0, "relay bank needs at least one channel");
        Self {
            channels: pins.map(|pin| GpioRelay::new(pin, inverted)),
        }
    }

    /// All channels, primary first
    pub fn channels(&self) -> &[GpioRelay<P>] {
        &self.channels
    }

    /// Channel driving the load
    pub fn primary(&self) -> &GpioRelay<P> {
        &self.channels[0]
    }

    /// Mutable access to the channel driving the load
    pub fn primary_mut(&mut self) -> &mut GpioRelay<P> {
        &mut self.channels[0]
    }

    /// Get a channel by index
    pub fn channel(&self, index: usize) -> Option<&GpioRelay<P>> {
        self.channels.get(index)
    }
}

impl<P: OutputPin, const N: usize> RelayOutput for RelayBank<P, N> {
    fn set_active(&mut self, active: bool) {
        self.primary_mut().set_active(active);
    }

    fn is_active(&self) -> bool {
        self.primary().is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new(high: bool) -> Self {
            Self { high }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_relay() {
        let mut relay = GpioRelay::new_active_high(MockPin::new(true));

        // Released on construction
        assert!(!relay.is_active());
        assert!(!relay.pin().is_set_high());

        relay.set_active(true);
        assert!(relay.is_active());
        assert!(relay.pin().is_set_high());

        relay.set_active(false);
        assert!(!relay.is_active());
        assert!(!relay.pin().is_set_high());
    }

    #[test]
    fn test_active_low_relay() {
        let mut relay = GpioRelay::new_active_low(MockPin::new(false));

        // Released means pin high for active-low boards
        assert!(!relay.is_active());
        assert!(relay.pin().is_set_high());

        relay.set_active(true);
        assert!(relay.is_active());
        assert!(!relay.pin().is_set_high());
    }

    #[test]
    fn test_bank_releases_all_and_switches_primary() {
        let pins = [
            MockPin::new(true),
            MockPin::new(true),
            MockPin::new(true),
            MockPin::new(true),
        ];
        let mut bank = RelayBank::new(pins, false);
        assert_eq!(bank.channels().len(), 4);

        for channel in bank.channels() {
            assert!(!channel.pin().is_set_high());
        }

        bank.set_active(true);
        assert!(bank.is_active());
        assert!(bank.primary().pin().is_set_high());
        for i in 1..4 {
            assert!(!bank.channel(i).unwrap().pin().is_set_high());
        }
        assert!(bank.channel(4).is_none());
    }
}
