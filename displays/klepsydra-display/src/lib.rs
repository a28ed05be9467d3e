//! Display abstraction traits and shared components for Klepsydra
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (HD44780 LCD, etc.)
//! - `Screen` buffer sized for the 20x4 LCD
//! - `StatusRenderer` laying out the drain timer state
//!
//! # Architecture
//!
//! The firmware renders into a `Screen` once per second (or immediately
//! after a phase switch) and pushes only changed content to the backend.
//! The backend implementation lives in `klepsydra-drivers`.

#![no_std]

pub mod backend;
pub mod renderer;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use renderer::{render_message, StatusRenderer};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
