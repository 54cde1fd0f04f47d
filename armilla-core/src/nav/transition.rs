//! Non-blocking screen-slide animation
//!
//! The animation owns no timer; the navigation loop feeds it the
//! current time each tick and reads the horizontal offset back out.

use crate::config::DISPLAY_WIDTH;

/// Slide animation length
pub const TRANSITION_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlideDirection {
    /// New screen enters from the right
    Left,
    /// New screen enters from the left
    Right,
}

/// One in-flight slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    direction: SlideDirection,
    started_ms: u64,
    duration_ms: u64,
    done: bool,
}

impl Transition {
    pub fn start(direction: SlideDirection, now_ms: u64) -> Self {
        Self {
            direction,
            started_ms: now_ms,
            duration_ms: TRANSITION_MS,
            done: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.done
    }

    /// Advance to `now_ms`; returns true while still animating
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.started_ms) >= self.duration_ms {
            self.done = true;
        }
        !self.done
    }

    /// Completion in parts per 256
    pub fn progress(&self, now_ms: u64) -> u32 {
        if self.done {
            return 256;
        }
        let elapsed = now_ms.saturating_sub(self.started_ms).min(self.duration_ms);
        (elapsed * 256 / self.duration_ms) as u32
    }

    /// Horizontal offset of the incoming screen, px
    ///
    /// Starts at a full panel width off-screen and settles at zero.
    pub fn offset_px(&self, now_ms: u64) -> i32 {
        let remaining = 256 - self.progress(now_ms) as i32;
        let magnitude = DISPLAY_WIDTH * remaining / 256;
        match self.direction {
            SlideDirection::Left => magnitude,
            SlideDirection::Right => -magnitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_converges_to_zero() {
        let mut t = Transition::start(SlideDirection::Left, 1_000);
        assert_eq!(t.offset_px(1_000), DISPLAY_WIDTH);

        assert!(t.advance(1_150));
        let mid = t.offset_px(1_150);
        assert!(mid > 0 && mid < DISPLAY_WIDTH);

        assert!(!t.advance(1_300));
        assert_eq!(t.offset_px(1_300), 0);
        assert!(!t.is_active());
    }

    #[test]
    fn test_right_slide_is_negative() {
        let t = Transition::start(SlideDirection::Right, 0);
        assert_eq!(t.offset_px(0), -DISPLAY_WIDTH);
    }

    #[test]
    fn test_progress_is_monotone() {
        let t = Transition::start(SlideDirection::Left, 0);
        let mut last = 0;
        for now in (0..=300).step_by(16) {
            let p = t.progress(now);
            assert!(p >= last);
            last = p;
        }
        assert_eq!(t.progress(300), 256);
    }

    #[test]
    fn test_clock_jump_finishes_cleanly() {
        let mut t = Transition::start(SlideDirection::Left, 0);
        assert!(!t.advance(10_000));
        assert_eq!(t.offset_px(10_000), 0);
    }
}
