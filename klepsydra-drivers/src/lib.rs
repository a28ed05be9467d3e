//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in klepsydra-core, klepsydra-hal and klepsydra-display:
//!
//! - Relay outputs (single GPIO relay, multi-channel relay board)
//! - Serial diagnostics sink
//! - HD44780 character LCD behind a PCF8574 I2C backpack
//! - `embedded-hal` pin adapter

#![no_std]
#![deny(unsafe_code)]

pub mod lcd;
pub mod pin;
pub mod relay;
pub mod serial;

pub use lcd::{Hd44780, LcdConfig};
pub use pin::HalPin;
pub use relay::{GpioRelay, RelayBank};
pub use serial::UartDiagnostics;
