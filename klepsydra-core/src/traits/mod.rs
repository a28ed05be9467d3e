//! Collaborator traits
//!
//! These traits define the interface between the duty-cycle logic and the
//! hardware it drives.

pub mod diagnostics;
pub mod relay;

pub use diagnostics::{DiagnosticSink, LINE_CAPACITY};
pub use relay::RelayOutput;
