//! Shared state handed to app hooks

use crate::config::Settings;
use crate::motion::ActivityStats;
use crate::traits::Display;

/// Per-boot app scratch state
///
/// Apps keep their working state here instead of in statics, so tests
/// can build a fresh world per case and hooks stay plain `fn` items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    pub music_playing: bool,
    pub track_index: u8,
    pub quest_index: u8,
    pub note_count: u8,
    pub pdf_page: u16,
    pub game_index: u8,
}

/// Everything an app hook may touch
pub struct WatchContext<'a> {
    pub display: &'a mut dyn Display,
    pub settings: &'a mut Settings,
    pub stats: &'a ActivityStats,
    pub session: &'a mut Session,
    pub now_ms: u64,
}
