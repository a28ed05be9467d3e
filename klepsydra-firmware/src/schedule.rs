//! Drain schedule baked in from schedule.toml

use klepsydra_core::scheduler::Schedule;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/schedule.rs"));
}

pub use generated::{HIGH_MS, LOW_MS};

/// Schedule the firmware runs
///
/// build.rs already rejects zero durations; this keeps the check in the
/// type system as well.
pub const SCHEDULE: Schedule = match Schedule::new(LOW_MS, HIGH_MS) {
    Ok(schedule) => schedule,
    Err(_) => panic!("schedule.toml durations must be positive"),
};
