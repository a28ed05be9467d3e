//! Tick task
//!
//! Samples the millisecond clock at a fixed cadence and hands each reading
//! to the control loop.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use klepsydra_hal::{Millis, MonotonicClock};

use crate::board::EmbassyClock;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 100;

/// Latest clock reading for the control loop
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, Millis> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(clock.now_millis());
    }
}
