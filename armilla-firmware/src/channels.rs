//! Inter-task communication channels
//!
//! Static embassy-sync primitives shared between tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use armilla_core::motion::StepEvent;

/// Channel capacity for step events
///
/// Steps arrive at walking cadence, the consumer just logs them, so a
/// small buffer is plenty. The producer drops on overflow rather than
/// stalling the UI loop.
const STEP_CHANNEL_SIZE: usize = 8;

/// Step events from the navigation loop to the activity logger
pub static STEP_EVENTS: Channel<CriticalSectionRawMutex, StepEvent, STEP_CHANNEL_SIZE> =
    Channel::new();

/// Charger presence, latest state wins
pub static CHARGER_STATE: Signal<CriticalSectionRawMutex, bool> = Signal::new();
