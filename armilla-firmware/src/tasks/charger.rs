//! Charger presence monitor
//!
//! Watches the VBUS detect pin and signals state changes to the UI
//! task. Debounced by waiting out contact bounce after each edge.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use crate::channels::CHARGER_STATE;

const DEBOUNCE_MS: u64 = 50;

#[embassy_executor::task]
pub async fn charger_task(mut vbus: Input<'static>) {
    info!("Charger task started");

    let mut last = vbus.is_high();
    CHARGER_STATE.signal(last);

    loop {
        vbus.wait_for_any_edge().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;

        let level = vbus.is_high();
        if level != last {
            last = level;
            info!("Charger {}", if level { "connected" } else { "removed" });
            CHARGER_STATE.signal(level);
        }
    }
}
