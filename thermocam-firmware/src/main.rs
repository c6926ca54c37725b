//! Thermocam - Thermal Camera Sensor Firmware
//!
//! Main firmware binary for RP2040-based boards carrying a Grid-EYE 8x8
//! thermopile array. Frames are captured once per tick while a viewer is
//! subscribed and forwarded to the wireless transport.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{Async, Config as I2cPeripheralConfig, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

use thermocam_drivers::indicator::FaultLed;
use thermocam_drivers::sensor::GridEye;
use thermocam_hal_rp2040::{I2cConfig, LedPin, TimedI2c};

mod channels;
mod config;
mod tasks;
mod transport;

/// Embedded device configuration (compiled into firmware)
/// Edit thermocam.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../thermocam.toml");

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// Sensor on the board's I2C0 bus (SDA GP4, SCL GP5)
pub type BoardSensor = GridEye<TimedI2c<I2c<'static, I2C0, Async>>>;

/// On-board status LED (GP25)
pub type BoardLed = FaultLed<LedPin<'static>>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermocam firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config(EMBEDDED_CONFIG);
    info!(
        "Sensor at {=u8:#x}, {} Hz bus, {} ms tick",
        config.sensor_address, config.i2c_frequency, config.tick_interval_ms
    );

    let mut i2c_config = I2cPeripheralConfig::default();
    i2c_config.frequency = config.i2c_frequency;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let bus = TimedI2c::new(
        i2c,
        &I2cConfig {
            frequency: config.i2c_frequency,
            timeout_ms: config.bus_timeout_ms,
        },
    );

    let sensor: BoardSensor =
        GridEye::with_address(bus, config.sensor_address).with_frame_rate(config.frame_rate);
    let led: BoardLed = FaultLed::new_active_high(LedPin::new(p.PIN_25));

    spawner.must_spawn(tasks::link_task());
    spawner.must_spawn(tasks::camera_task(sensor, led, config.tick_interval_ms));

    info!("All tasks spawned");
}
