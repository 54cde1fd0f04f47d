//! Touch samples and classified gesture events

/// One polled reading from the touch controller
///
/// Coordinates are already calibration-corrected and clamped to the
/// display surface by the sample source. A poll with `contact == false`
/// is a release edge (or idle surface); a failed read never produces a
/// sample at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Whether a finger is on the surface
    pub contact: bool,
    /// Display x coordinate
    pub x: i32,
    /// Display y coordinate
    pub y: i32,
    /// Sample timestamp in milliseconds
    pub timestamp_ms: u64,
}

impl TouchSample {
    /// A contact sample at the given position
    pub const fn contact(x: i32, y: i32, timestamp_ms: u64) -> Self {
        Self {
            contact: true,
            x,
            y,
            timestamp_ms,
        }
    }

    /// A release (no contact) sample
    pub const fn release(timestamp_ms: u64) -> Self {
        Self {
            contact: false,
            x: 0,
            y: 0,
            timestamp_ms,
        }
    }
}

/// Classified gesture kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureKind {
    /// Finger down
    Press,
    /// Finger up after a press that was neither tap nor long-press
    Release,
    /// Finger moved while down
    Move,
    /// Quick press-and-release (< 200 ms)
    Tap,
    /// Held press (> 800 ms)
    LongPress,
    SwipeUp,
    SwipeDown,
    SwipeLeft,
    SwipeRight,
}

impl GestureKind {
    /// Events that end a contact session
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GestureKind::Release | GestureKind::Tap | GestureKind::LongPress
        )
    }

    /// Directional swipe events
    pub fn is_swipe(&self) -> bool {
        matches!(
            self,
            GestureKind::SwipeUp
                | GestureKind::SwipeDown
                | GestureKind::SwipeLeft
                | GestureKind::SwipeRight
        )
    }
}

/// A classified gesture event
///
/// "No event this poll" is represented as `Option::None` by the
/// classifier, never as a sentinel kind, so it cannot be mistaken for a
/// real event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureEvent {
    pub kind: GestureKind,
    /// Current position
    pub x: i32,
    pub y: i32,
    /// Reference position for this event: where the contact session
    /// started for press and terminal events, or the previously
    /// recorded position the displacement was measured from for move
    /// and swipe events
    pub start_x: i32,
    pub start_y: i32,
    /// Time since the initiating press, in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_kinds() {
        assert!(GestureKind::Tap.is_terminal());
        assert!(GestureKind::LongPress.is_terminal());
        assert!(GestureKind::Release.is_terminal());
        assert!(!GestureKind::Press.is_terminal());
        assert!(!GestureKind::Move.is_terminal());
        assert!(!GestureKind::SwipeLeft.is_terminal());
    }

    #[test]
    fn test_swipe_kinds() {
        assert!(GestureKind::SwipeUp.is_swipe());
        assert!(GestureKind::SwipeDown.is_swipe());
        assert!(GestureKind::SwipeLeft.is_swipe());
        assert!(GestureKind::SwipeRight.is_swipe());
        assert!(!GestureKind::Move.is_swipe());
        assert!(!GestureKind::Tap.is_swipe());
    }
}
