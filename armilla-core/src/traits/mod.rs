//! Hardware abstraction traits
//!
//! Drivers live in their own crate; the core only sees pull-style
//! sample sources and a minimal drawing surface.

use crate::config::Rgb565;
use crate::input::TouchSample;
use crate::motion::AccelSample;

/// Errors that can occur talking to the display panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus communication failure
    Bus,
    /// Coordinates outside the panel
    OutOfBounds,
    /// Panel not initialized or asleep
    NotReady,
}

/// Minimal drawing surface
///
/// Object-safe on purpose: app hooks receive `&mut dyn Display` so the
/// registry table stays free of generic parameters.
pub trait Display {
    /// Fill the whole panel with one color
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565)
        -> Result<(), DisplayError>;

    /// Draw a text run at a pixel position
    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb565) -> Result<(), DisplayError>;

    /// Push the frame to the panel
    fn present(&mut self) -> Result<(), DisplayError>;
}

/// Pull-style touch source
///
/// `poll` returns `None` when no fresh sample is available; that is the
/// normal quiescent answer, not an error. Release edges must still be
/// reported as a non-contact sample so gesture sessions terminate.
pub trait TouchSampleSource {
    fn poll(&mut self, now_ms: u64) -> Option<TouchSample>;
}

/// Pull-style accelerometer source
///
/// Implementations own their sampling cadence; callers may poll faster
/// than the sensor produces data.
pub trait AccelSampleSource {
    fn poll(&mut self, now_ms: u64) -> Option<AccelSample>;
}
