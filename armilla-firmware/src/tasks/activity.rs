//! Activity logger task
//!
//! Drains step events from the UI loop and logs them. Kept separate so
//! the UI tick never blocks on logging.

use defmt::*;

use crate::channels::STEP_EVENTS;

#[embassy_executor::task]
pub async fn activity_task() {
    info!("Activity task started");

    let mut total: u32 = 0;
    loop {
        let step = STEP_EVENTS.receive().await;
        total += 1;
        debug!("step #{} at {} ms", total, step.timestamp_ms);
    }
}
