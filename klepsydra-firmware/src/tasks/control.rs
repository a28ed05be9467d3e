//! Drain control loop
//!
//! Runs on the main task and owns the controller. Every clock reading from
//! the tick task advances the schedule; the LCD is refreshed once per
//! second, or straight away when the phase changes.

use defmt::*;
use klepsydra_core::traits::{DiagnosticSink, RelayOutput};
use klepsydra_core::{DrainController, Millis};
use klepsydra_display::{DisplayBackend, StatusRenderer};

use super::tick::{TICK_INTERVAL_MS, TICK_SIGNAL};

/// Minimum time between periodic display refreshes
pub const DISPLAY_REFRESH_MS: Millis = 1_000;

/// Switches detected later than this after the boundary are reported
const LATE_SWITCH_MS: Millis = 2 * TICK_INTERVAL_MS;

/// Run the drain schedule forever
///
/// `display` is `None` when the LCD failed to initialize; the relay keeps
/// running without it.
pub async fn control_loop<R, D, B>(
    mut controller: DrainController<R, D>,
    mut display: Option<B>,
) -> !
where
    R: RelayOutput,
    D: DiagnosticSink,
    B: DisplayBackend,
{
    info!("Control loop started");

    let mut renderer = StatusRenderer::new();
    let mut last_refresh: Option<Millis> = None;

    loop {
        let now = TICK_SIGNAL.wait().await;

        if let Some(switch) = controller.tick(now) {
            info!(
                "Relay {}: {}",
                if switch.phase.is_active() { "ON" } else { "OFF" },
                Display2Format(&switch)
            );
            if switch.latency() > LATE_SWITCH_MS {
                warn!("Switch detected {} ms after boundary", switch.latency());
            }
        }

        let state_changed = controller.take_state_changed();
        let Some(backend) = display.as_mut() else {
            continue;
        };

        let due = last_refresh.map_or(true, |at| now.wrapping_sub(at) >= DISPLAY_REFRESH_MS);
        if !(state_changed || due) {
            continue;
        }
        last_refresh = Some(now);

        renderer.render(controller.scheduler(), now);
        match renderer.flush_to(backend) {
            Ok(true) => debug!("Display refreshed"),
            Ok(false) => {}
            Err(e) => {
                warn!("Display update failed: {:?}", e);
                // Redraw everything once the bus recovers
                renderer.invalidate();
            }
        }
    }
}
