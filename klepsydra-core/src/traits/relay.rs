//! Relay output trait

/// Trait for relay output control
///
/// Implementations drive the relay coil via GPIO, directly or through a
/// transistor/opto-isolated relay board.
pub trait RelayOutput {
    /// Energize (`true`) or release (`false`) the relay
    fn set_active(&mut self, active: bool);

    /// Check if the relay is currently energized
    fn is_active(&self) -> bool;
}

impl<T: RelayOutput + ?Sized> RelayOutput for &mut T {
    fn set_active(&mut self, active: bool) {
        (**self).set_active(active);
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
