//! Board-agnostic core logic for the drain timer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Duty-cycle scheduler (phase table, drift-free anchor, switch records)
//! - Duration formatting for the character display
//! - Drain controller tying the scheduler to a relay and a diagnostic sink
//! - Collaborator traits (relay output, diagnostic sink)
//! - Schedule configuration type
//! - Fixed-width text helpers

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod duration;
pub mod scheduler;
pub mod text;
pub mod traits;

pub use controller::DrainController;
pub use klepsydra_hal::Millis;
