//! Main UI task
//!
//! Runs the navigation controller at the UI tick rate: polls the touch
//! and accel drivers, steps the controller, forwards step events to the
//! activity logger.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::{I2C0, I2C1, UART0};
use embassy_rp::uart::Uart;
use embassy_time::{Duration, Instant, Ticker};

use armilla_core::config::UI_TICK_INTERVAL_MS;
use armilla_core::nav::NavigationController;
use armilla_drivers::imu::Qmi8658;
use armilla_drivers::touch::Ft3168;

use crate::channels::{CHARGER_STATE, STEP_EVENTS};
use crate::display::TermDisplay;

#[embassy_executor::task]
pub async fn watch_task(
    mut nav: NavigationController,
    mut display: TermDisplay<Uart<'static, UART0, embassy_rp::uart::Blocking>>,
    mut touch: Ft3168<I2c<'static, I2C0, Blocking>>,
    mut imu: Qmi8658<I2c<'static, I2C1, Blocking>>,
) {
    info!("Watch task started");

    let start = Instant::now();
    if let Err(e) = nav.boot(&mut display, start.elapsed().as_millis()) {
        error!("Boot failed: {}", e);
        return;
    }

    let mut ticker = Ticker::every(Duration::from_millis(UI_TICK_INTERVAL_MS));
    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis();

        if let Some(charging) = CHARGER_STATE.try_take() {
            nav.set_charging(charging, now_ms);
        }

        let outcome = nav.tick(&mut display, &mut touch, &mut imu, now_ms);

        if let Some(step) = outcome.step {
            // Drop on overflow; the logger will catch up
            let _ = STEP_EVENTS.try_send(step);
        }
    }
}
