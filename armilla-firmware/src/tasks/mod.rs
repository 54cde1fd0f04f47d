//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod activity;
pub mod charger;
pub mod watch;

pub use activity::activity_task;
pub use charger::charger_task;
pub use watch::watch_task;
