//! Embassy tasks
//!
//! Each task handles a specific subsystem and communicates via signals.

mod control;
mod tick;

pub use control::control_loop;
pub use tick::tick_task;
