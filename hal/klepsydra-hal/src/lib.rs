//! Klepsydra Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the drain timer needs
//! from a board: a digital output for the relay, a free-running millisecond
//! clock and a serial transmitter for diagnostics. Chip-specific code (the
//! RP2040 firmware, host test doubles) implements them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (klepsydra-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  klepsydra-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embassy-rp   │       │  host mocks   │
//! │   (RP2040)    │       │   (tests)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`clock::MonotonicClock`] - Wrapping millisecond clock
//! - [`uart::UartTx`] - Serial transmit

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::{Millis, MonotonicClock};
pub use gpio::{Level, OutputPin};
pub use uart::UartTx;
