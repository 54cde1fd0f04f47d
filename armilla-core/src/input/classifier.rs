//! Gesture classification state machine
//!
//! Consumes one touch sample per call and produces at most one gesture
//! event. The machine moves `Idle -> Down -> Dragging -> Idle`; a
//! missed poll (no sample available) is simply not fed in and leaves an
//! in-progress press untouched.

use super::gesture::{GestureEvent, GestureKind, TouchSample};

/// Classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureConfig {
    /// Minimum per-axis displacement before a sample counts as movement
    pub move_threshold: i32,
    /// Minimum dominant-axis travel for a swipe
    pub swipe_threshold: i32,
    /// Swipe window lower bound, exclusive (ms since press)
    pub swipe_min_ms: u64,
    /// Swipe window upper bound, exclusive
    pub swipe_max_ms: u64,
    /// Releases faster than this classify as taps (exclusive)
    pub tap_max_ms: u64,
    /// Releases slower than this classify as long-presses (exclusive)
    pub long_press_min_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            move_threshold: 5,
            swipe_threshold: 50,
            swipe_min_ms: 100,
            swipe_max_ms: 500,
            tap_max_ms: 200,
            long_press_min_ms: 800,
        }
    }
}

/// Contact-session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    /// No finger on the surface
    Idle,
    /// Finger down, has not yet moved past the move threshold
    Down,
    /// Finger down and moving
    Dragging,
}

/// Touch-sample-to-gesture classifier
///
/// Stateful across calls but owned by a single logical thread (the
/// navigation loop); no synchronization needed.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    phase: Phase,
    /// Position where the current contact session began
    start_x: i32,
    start_y: i32,
    /// Timestamp of the initiating press
    press_ms: u64,
    /// Last recorded position (updates only on accepted movement)
    last_x: i32,
    last_y: i32,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureClassifier {
    /// Create a classifier with the given thresholds
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            start_x: 0,
            start_y: 0,
            press_ms: 0,
            last_x: 0,
            last_y: 0,
        }
    }

    /// Whether a contact session is in progress
    pub fn is_pressed(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Drop any in-progress session without emitting a terminal event
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Consume one sample, producing at most one event
    pub fn update(&mut self, sample: TouchSample) -> Option<GestureEvent> {
        if sample.contact {
            match self.phase {
                Phase::Idle => Some(self.begin_press(sample)),
                Phase::Down | Phase::Dragging => self.track_movement(sample),
            }
        } else {
            self.end_press(sample)
        }
    }

    fn begin_press(&mut self, sample: TouchSample) -> GestureEvent {
        self.phase = Phase::Down;
        self.start_x = sample.x;
        self.start_y = sample.y;
        self.last_x = sample.x;
        self.last_y = sample.y;
        self.press_ms = sample.timestamp_ms;

        GestureEvent {
            kind: GestureKind::Press,
            x: sample.x,
            y: sample.y,
            start_x: sample.x,
            start_y: sample.y,
            duration_ms: 0,
        }
    }

    fn track_movement(&mut self, sample: TouchSample) -> Option<GestureEvent> {
        let dx = sample.x - self.last_x;
        let dy = sample.y - self.last_y;

        // Below the movement threshold: no event, and the reference
        // position stays put so slow creep still accumulates.
        if dx.abs() <= self.config.move_threshold && dy.abs() <= self.config.move_threshold {
            return None;
        }

        self.phase = Phase::Dragging;
        let duration = sample.timestamp_ms.saturating_sub(self.press_ms);
        let kind = self.classify_movement(dx, dy, duration);

        let event = GestureEvent {
            kind,
            x: sample.x,
            y: sample.y,
            start_x: self.last_x,
            start_y: self.last_y,
            duration_ms: duration,
        };

        self.last_x = sample.x;
        self.last_y = sample.y;

        Some(event)
    }

    /// Decide between plain movement and a directional swipe
    ///
    /// A swipe needs 100 ms < duration < 500 ms (both exclusive) and
    /// more than 50 units of travel on the dominant axis. The axis
    /// choice is horizontal only for strictly |dx| > |dy|; an exact tie
    /// resolves to a vertical swipe. Downstream screens key off that
    /// tie-break, so it stays as-is.
    fn classify_movement(&self, dx: i32, dy: i32, duration_ms: u64) -> GestureKind {
        let in_window =
            duration_ms > self.config.swipe_min_ms && duration_ms < self.config.swipe_max_ms;
        if !in_window || dx.abs().max(dy.abs()) <= self.config.swipe_threshold {
            return GestureKind::Move;
        }

        if dx.abs() > dy.abs() {
            if dx > 0 {
                GestureKind::SwipeRight
            } else {
                GestureKind::SwipeLeft
            }
        } else if dy > 0 {
            GestureKind::SwipeDown
        } else {
            GestureKind::SwipeUp
        }
    }

    fn end_press(&mut self, sample: TouchSample) -> Option<GestureEvent> {
        if self.phase == Phase::Idle {
            return None;
        }

        self.phase = Phase::Idle;
        let duration = sample.timestamp_ms.saturating_sub(self.press_ms);

        let kind = if duration < self.config.tap_max_ms {
            GestureKind::Tap
        } else if duration > self.config.long_press_min_ms {
            GestureKind::LongPress
        } else {
            GestureKind::Release
        };

        Some(GestureEvent {
            kind,
            x: self.last_x,
            y: self.last_y,
            start_x: self.start_x,
            start_y: self.start_y,
            duration_ms: duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(x: i32, y: i32, t: u64) -> TouchSample {
        TouchSample::contact(x, y, t)
    }

    #[test]
    fn test_press_then_quick_release_is_tap() {
        let mut c = GestureClassifier::default();

        let press = c.update(contact(100, 100, 0)).unwrap();
        assert_eq!(press.kind, GestureKind::Press);
        assert_eq!((press.x, press.y), (100, 100));

        let tap = c.update(TouchSample::release(150)).unwrap();
        assert_eq!(tap.kind, GestureKind::Tap);
        assert_eq!(tap.duration_ms, 150);
        assert_eq!((tap.start_x, tap.start_y), (100, 100));
    }

    #[test]
    fn test_release_duration_windows() {
        // (duration, expected terminal kind)
        let cases = [
            (0, GestureKind::Tap),
            (199, GestureKind::Tap),
            (200, GestureKind::Release),
            (500, GestureKind::Release),
            (800, GestureKind::Release),
            (801, GestureKind::LongPress),
            (2000, GestureKind::LongPress),
        ];

        for (duration, expected) in cases {
            let mut c = GestureClassifier::default();
            c.update(contact(50, 50, 0));
            let event = c.update(TouchSample::release(duration)).unwrap();
            assert_eq!(event.kind, expected, "duration {}", duration);
        }
    }

    #[test]
    fn test_at_most_one_press_per_session() {
        let mut c = GestureClassifier::default();
        let mut presses = 0;

        // Hold and wiggle for a while without releasing
        for i in 0..50u64 {
            let sample = contact(100 + (i as i32 % 3), 100, i * 20);
            if let Some(event) = c.update(sample) {
                if event.kind == GestureKind::Press {
                    presses += 1;
                }
            }
        }
        assert_eq!(presses, 1);
    }

    #[test]
    fn test_press_terminated_by_exactly_one_terminal_event() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        c.update(contact(120, 100, 600));

        let terminal = c.update(TouchSample::release(700)).unwrap();
        assert!(terminal.kind.is_terminal());

        // Further idle polls produce nothing
        assert!(c.update(TouchSample::release(750)).is_none());
        assert!(c.update(TouchSample::release(800)).is_none());
    }

    #[test]
    fn test_small_movement_is_not_an_event() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        // 5 units on each axis is at the threshold, not over it
        assert!(c.update(contact(105, 105, 50)).is_none());
        assert!(c.update(contact(100, 100, 100)).is_none());
    }

    #[test]
    fn test_movement_emits_move() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));

        let event = c.update(contact(110, 100, 50)).unwrap();
        assert_eq!(event.kind, GestureKind::Move);
        assert_eq!((event.x, event.y), (110, 100));
        assert_eq!((event.start_x, event.start_y), (100, 100));
    }

    #[test]
    fn test_swipe_right_scenario() {
        // Press at (100,100), move to (160,100) at 250 ms: dx=60 > 50
        // and 100 < 250 < 500, so this is a swipe, not a plain move.
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));

        let event = c.update(contact(160, 100, 250)).unwrap();
        assert_eq!(event.kind, GestureKind::SwipeRight);
        assert_eq!(event.duration_ms, 250);
    }

    #[test]
    fn test_swipe_directions() {
        let cases = [
            ((160, 100), GestureKind::SwipeRight),
            ((40, 100), GestureKind::SwipeLeft),
            ((100, 160), GestureKind::SwipeDown),
            ((100, 40), GestureKind::SwipeUp),
        ];

        for ((x, y), expected) in cases {
            let mut c = GestureClassifier::default();
            c.update(contact(100, 100, 0));
            let event = c.update(contact(x, y, 250)).unwrap();
            assert_eq!(event.kind, expected, "target ({}, {})", x, y);
        }
    }

    #[test]
    fn test_equal_axes_resolve_to_vertical_swipe() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));

        // |dx| == |dy| == 60: not strictly horizontal, so vertical wins
        let event = c.update(contact(160, 160, 250)).unwrap();
        assert_eq!(event.kind, GestureKind::SwipeDown);

        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        let event = c.update(contact(40, 40, 250)).unwrap();
        assert_eq!(event.kind, GestureKind::SwipeUp);
    }

    #[test]
    fn test_swipe_outside_time_window_is_move() {
        // Too fast (duration == lower bound is excluded)
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        let event = c.update(contact(160, 100, 100)).unwrap();
        assert_eq!(event.kind, GestureKind::Move);

        // Too slow
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        let event = c.update(contact(160, 100, 500)).unwrap();
        assert_eq!(event.kind, GestureKind::Move);
    }

    #[test]
    fn test_swipe_below_travel_threshold_is_move() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        // 50 units exactly is not enough
        let event = c.update(contact(150, 100, 250)).unwrap();
        assert_eq!(event.kind, GestureKind::Move);
    }

    #[test]
    fn test_swipe_displacement_is_per_poll_not_cumulative() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));

        // Two 30-unit moves: each below the swipe threshold even though
        // the total travel is 60.
        let first = c.update(contact(130, 100, 150)).unwrap();
        assert_eq!(first.kind, GestureKind::Move);
        let second = c.update(contact(160, 100, 300)).unwrap();
        assert_eq!(second.kind, GestureKind::Move);
    }

    #[test]
    fn test_missed_polls_preserve_session() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        assert!(c.is_pressed());

        // The source returned None for a while; nothing was fed in.
        // The session must still terminate normally.
        let event = c.update(TouchSample::release(150)).unwrap();
        assert_eq!(event.kind, GestureKind::Tap);
        assert!(!c.is_pressed());
    }

    #[test]
    fn test_release_position_is_last_recorded() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        c.update(contact(150, 120, 300));

        let event = c.update(TouchSample::release(400)).unwrap();
        assert_eq!((event.x, event.y), (150, 120));
        assert_eq!((event.start_x, event.start_y), (100, 100));
    }

    #[test]
    fn test_idle_release_is_noop() {
        let mut c = GestureClassifier::default();
        assert!(c.update(TouchSample::release(0)).is_none());
    }

    #[test]
    fn test_new_session_after_release() {
        let mut c = GestureClassifier::default();
        c.update(contact(100, 100, 0));
        c.update(TouchSample::release(150));

        let press = c.update(contact(200, 200, 1000)).unwrap();
        assert_eq!(press.kind, GestureKind::Press);
        assert_eq!((press.start_x, press.start_y), (200, 200));
    }

    use proptest::prelude::*;

    proptest! {
        /// Over arbitrary sample scripts: every session emits exactly
        /// one press, followed by exactly one terminal event, and
        /// movement events only occur between the two.
        #[test]
        fn test_random_scripts_pair_press_with_one_terminal(
            script in prop::collection::vec(
                (any::<bool>(), 0..368i32, 0..448i32),
                1..64,
            ),
        ) {
            let mut c = GestureClassifier::default();
            let mut session_open = false;
            for (i, &(touching, x, y)) in script.iter().enumerate() {
                let t = i as u64 * 16;
                let sample = if touching {
                    TouchSample::contact(x, y, t)
                } else {
                    TouchSample::release(t)
                };
                let Some(event) = c.update(sample) else { continue };
                match event.kind {
                    GestureKind::Press => {
                        prop_assert!(!session_open, "press inside an open session");
                        session_open = true;
                    }
                    kind if kind.is_terminal() => {
                        prop_assert!(session_open, "terminal event without a press");
                        session_open = false;
                    }
                    _ => prop_assert!(session_open, "movement outside a session"),
                }
            }
        }
    }
}
