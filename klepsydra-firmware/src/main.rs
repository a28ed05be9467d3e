//! Klepsydra - Drain Timer Firmware
//!
//! Main firmware binary for RP2040-based drain valve controllers. Drives a
//! relay through a fixed two-phase duty cycle (short off phase, long on
//! phase) and shows the countdown on a 20x4 character LCD.
//!
//! Named after the Greek "klepsydra", the water clock that measured time
//! by letting water drain away.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use klepsydra_core::DrainController;
use klepsydra_drivers::{HalPin, Hd44780, LcdConfig, RelayBank, UartDiagnostics};
use klepsydra_hal::uart::UartConfig as SerialSettings;
use klepsydra_hal::MonotonicClock;

use crate::board::{EmbassyClock, SerialPort, RELAY_CHANNELS};
use crate::schedule::{HIGH_MS, LOW_MS, SCHEDULE};

mod board;
mod schedule;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Klepsydra firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Relay board: every channel released at boot, channel 1 drives the valve
    let relay_pins: [Output<'static>; RELAY_CHANNELS] = [
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
    ];
    let relays = RelayBank::new(relay_pins.map(|pin| HalPin::new(pin, false)), false);
    info!("Relay bank initialized ({} channels)", RELAY_CHANNELS);

    // Diagnostic log on UART0
    let baudrate = SerialSettings::default().baudrate;
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = baudrate;
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let (tx, _rx) = uart.split();
    let diagnostics = UartDiagnostics::new(SerialPort::new(tx));
    info!("UART initialized at {} baud", baudrate);

    // Status LCD on I2C0
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, I2cConfig::default());
    let lcd_config = LcdConfig::default();
    let mut lcd = Hd44780::new(i2c, Delay, lcd_config);
    let display = match lcd.init() {
        Ok(()) => {
            info!("LCD initialized: {:?}", lcd_config);
            Some(lcd)
        }
        Err(e) => {
            error!("LCD init failed: {:?}, running without display", e);
            None
        }
    };

    info!("Schedule: low {} ms, high {} ms", LOW_MS, HIGH_MS);
    let controller = DrainController::new(SCHEDULE, relays, diagnostics, EmbassyClock.now_millis());

    spawner.spawn(unwrap!(tasks::tick_task()));
    info!("Tick task spawned, firmware running");

    // The main task owns the controller from here on
    tasks::control_loop(controller, display).await
}
