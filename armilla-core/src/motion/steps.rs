//! Peak-and-valley step detection over accelerometer magnitude
//!
//! A step is a crossing of the peak threshold from below the valley
//! level, debounced so at most one step lands per window. All
//! comparisons run on squared magnitudes, so no square root is needed.

/// One accelerometer reading, in g per axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub timestamp_ms: u64,
}

impl AccelSample {
    pub const fn new(x: f32, y: f32, z: f32, timestamp_ms: u64) -> Self {
        Self { x, y, z, timestamp_ms }
    }

    /// Squared magnitude of the acceleration vector, in g squared
    pub fn magnitude_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
}

/// A single detected step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepEvent {
    pub timestamp_ms: u64,
}

/// Step detection thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepConfig {
    /// Peak threshold in g
    pub threshold_g: f32,
    /// Minimum spacing between steps
    pub debounce_ms: u64,
    /// Fraction of the peak threshold the previous sample must sit
    /// below for a crossing to count as a rising edge
    pub valley_factor: f32,
    /// Fraction of the peak threshold the magnitude must fall below
    /// before the detector re-arms
    pub rearm_factor: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            threshold_g: 1.2,
            debounce_ms: 500,
            valley_factor: 0.8,
            rearm_factor: 0.7,
        }
    }
}

/// Dual-hysteresis step detector
///
/// Fed one sample per call; emits at most one step per call. Like the
/// gesture classifier it is owned by a single logical thread.
#[derive(Debug, Clone)]
pub struct StepDetector {
    /// Peak threshold, squared
    peak_sq: f32,
    /// Valley gate (previous sample must be below this), squared
    valley_sq: f32,
    /// Re-arm level, squared
    rearm_sq: f32,
    debounce_ms: u64,
    /// Squared magnitude of the previous sample
    last_mag_sq: f32,
    /// Set once a step fires, cleared when magnitude drops below the
    /// re-arm level
    in_progress: bool,
    /// Timestamp of the most recent step; absent before the first one
    last_step_ms: Option<u64>,
    total_steps: u32,
}

impl Default for StepDetector {
    fn default() -> Self {
        Self::new(StepConfig::default())
    }
}

impl StepDetector {
    pub fn new(config: StepConfig) -> Self {
        let peak = config.threshold_g;
        let valley = config.threshold_g * config.valley_factor;
        let rearm = config.threshold_g * config.rearm_factor;
        Self {
            peak_sq: peak * peak,
            valley_sq: valley * valley,
            rearm_sq: rearm * rearm,
            debounce_ms: config.debounce_ms,
            last_mag_sq: 0.0,
            in_progress: false,
            last_step_ms: None,
            total_steps: 0,
        }
    }

    /// Steps counted since construction or the last `reset`
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Clear the count and detection state
    pub fn reset(&mut self) {
        self.last_mag_sq = 0.0;
        self.in_progress = false;
        self.last_step_ms = None;
        self.total_steps = 0;
    }

    /// Consume one sample, producing at most one step
    pub fn update(&mut self, sample: AccelSample) -> Option<StepEvent> {
        let mag_sq = sample.magnitude_sq();
        let prev_sq = self.last_mag_sq;
        self.last_mag_sq = mag_sq;

        if self.in_progress {
            if mag_sq < self.rearm_sq {
                self.in_progress = false;
            }
            return None;
        }

        let debounced = match self.last_step_ms {
            Some(last) => sample.timestamp_ms.saturating_sub(last) > self.debounce_ms,
            None => true,
        };

        if mag_sq > self.peak_sq && prev_sq < self.valley_sq && debounced {
            self.in_progress = true;
            self.last_step_ms = Some(sample.timestamp_ms);
            self.total_steps += 1;
            return Some(StepEvent { timestamp_ms: sample.timestamp_ms });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Purely vertical sample, so magnitude equals |z|
    fn vertical(mag: f32, t: u64) -> AccelSample {
        AccelSample::new(0.0, 0.0, mag, t)
    }

    #[test]
    fn test_first_peak_is_a_step() {
        let mut d = StepDetector::default();
        assert!(d.update(vertical(0.5, 0)).is_none());
        let step = d.update(vertical(1.5, 50)).unwrap();
        assert_eq!(step.timestamp_ms, 50);
        assert_eq!(d.total_steps(), 1);
    }

    #[test]
    fn test_rest_magnitude_never_steps() {
        let mut d = StepDetector::default();
        for i in 0..100u64 {
            assert!(d.update(vertical(1.0, i * 50)).is_none());
        }
        assert_eq!(d.total_steps(), 0);
    }

    #[test]
    fn test_sustained_peak_without_rearm_stays_one_step() {
        // 0.5 -> 1.5 fires; holding above the re-arm level afterwards
        // never produces another step no matter how long it lasts.
        let mut d = StepDetector::default();
        d.update(vertical(0.5, 0));
        assert!(d.update(vertical(1.5, 50)).is_some());

        for i in 2..40u64 {
            assert!(d.update(vertical(0.9, i * 50)).is_none());
        }
        assert_eq!(d.total_steps(), 1);
    }

    #[test]
    fn test_reference_magnitude_sequence() {
        // 0.9, 0.9, 1.3, 1.3, 0.9, 1.3 at 50 ms spacing with a 1.2 g
        // threshold: the first rise to 1.3 is a step (preceded by
        // 0.9 < the 0.96 valley bound). The dip back to 0.9 never
        // reaches the 0.84 re-arm bound, so the later 1.3 is silent.
        let mags = [0.9, 0.9, 1.3, 1.3, 0.9, 1.3];
        let mut d = StepDetector::default();

        let mut events = 0;
        for (i, &m) in mags.iter().enumerate() {
            if let Some(step) = d.update(vertical(m, i as u64 * 50)) {
                events += 1;
                assert_eq!(step.timestamp_ms, 100);
            }
        }
        assert_eq!(events, 1);
    }

    #[test]
    fn test_two_crossings_inside_debounce_window_count_once() {
        let mut d = StepDetector::default();
        d.update(vertical(0.5, 0));
        assert!(d.update(vertical(1.5, 50)).is_some());

        // Full valley then a second peak, but only 250 ms later
        d.update(vertical(0.5, 150));
        assert!(d.update(vertical(1.5, 250)).is_none());
        assert_eq!(d.total_steps(), 1);
    }

    #[test]
    fn test_walking_cadence_counts_every_step() {
        // Peak-valley pairs 600 ms apart: each peak is a step.
        let mut d = StepDetector::default();
        let mut steps = 0;
        for i in 0..10u64 {
            let base = i * 600;
            d.update(vertical(0.5, base));
            if d.update(vertical(1.5, base + 100)).is_some() {
                steps += 1;
            }
            d.update(vertical(0.6, base + 300));
        }
        assert_eq!(steps, 10);
        assert_eq!(d.total_steps(), 10);
    }

    #[test]
    fn test_rearm_is_stricter_than_valley_gate() {
        // After a step the magnitude dips to 0.972 g, which never
        // reaches the re-arm level (0.84 g), so the detector stays
        // latched through every later peak.
        let mut d = StepDetector::default();
        d.update(vertical(0.5, 0));
        assert!(d.update(vertical(1.5, 100)).is_some());

        // 1.2 * 0.81 = 0.972 g, above re-arm 0.84 g
        for i in 0..20u64 {
            assert!(d.update(vertical(0.972, 200 + i * 600)).is_none());
            assert!(d.update(vertical(1.5, 500 + i * 600)).is_none());
        }
        assert_eq!(d.total_steps(), 1);
    }

    #[test]
    fn test_multi_axis_magnitude() {
        // (0.8, 0.8, 0.8) has magnitude ~1.39 g
        let mut d = StepDetector::default();
        d.update(vertical(0.5, 0));
        let step = d.update(AccelSample::new(0.8, 0.8, 0.8, 600));
        assert!(step.is_some());
    }

    #[test]
    fn test_reset_clears_count_and_state() {
        let mut d = StepDetector::default();
        d.update(vertical(0.5, 0));
        d.update(vertical(1.5, 50));
        assert_eq!(d.total_steps(), 1);

        d.reset();
        assert_eq!(d.total_steps(), 0);

        // First step after reset fires immediately again
        d.update(vertical(0.5, 100));
        assert!(d.update(vertical(1.5, 150)).is_some());
    }
}
