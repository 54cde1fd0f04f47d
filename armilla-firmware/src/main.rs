//! Armilla - Wrist-Watch Firmware
//!
//! Main firmware binary for RP2040-based smartwatch boards. Wires the
//! board-agnostic navigation core to the FT3168 touch controller, the
//! QMI8658 IMU, and a terminal display over UART.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::uart::{Config as UartConfig, Uart};
use {defmt_rtt as _, panic_probe as _};

use armilla_core::apps::builtin::default_registry;
use armilla_core::nav::NavigationController;
use armilla_drivers::imu::Qmi8658;
use armilla_drivers::touch::Ft3168;

use crate::display::TermDisplay;
use crate::storage::FLASH_SIZE;

mod channels;
mod display;
mod storage;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Armilla firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Touch calibration from the last flash sector
    let mut flash = Flash::<_, _, FLASH_SIZE>::new_blocking(p.FLASH);
    let calibration = storage::load_calibration(&mut flash);
    info!("Touch calibration loaded");

    // Touch controller on I2C0 (Pico: GPIO4 SDA, GPIO5 SCL)
    let touch_i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::default());
    let touch = Ft3168::new(touch_i2c, calibration);
    info!("FT3168 initialized");

    // IMU on I2C1 (GPIO2 SDA, GPIO3 SCL)
    let imu_i2c = I2c::new_blocking(p.I2C1, p.PIN_3, p.PIN_2, I2cConfig::default());
    let imu = match Qmi8658::init(imu_i2c) {
        Ok(imu) => imu,
        Err(_) => {
            defmt::panic!("QMI8658 not responding on either bus address");
        }
    };
    info!("QMI8658 initialized");

    // Terminal display over UART0 (GPIO0 TX, GPIO1 RX)
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let display = TermDisplay::new(uart);
    info!("Display initialized");

    // Charger presence on the VBUS detect pin (Pico: GPIO24)
    let vbus = Input::new(p.PIN_24, Pull::None);

    let nav = NavigationController::new(default_registry());

    spawner.spawn(tasks::watch_task(nav, display, touch, imu)).unwrap();
    spawner.spawn(tasks::activity_task()).unwrap();
    spawner.spawn(tasks::charger_task(vbus)).unwrap();

    info!("All tasks spawned, firmware running");
}
