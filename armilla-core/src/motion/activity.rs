//! Daily activity accumulation derived from step events

/// Rolling daily totals
///
/// Calories and distance are flat per-step estimates; active minutes
/// accrue from the timestamps of the steps themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivityStats {
    pub steps: u32,
    pub calories: f32,
    pub distance_km: f32,
    pub active_minutes: u32,
    /// Minute index (timestamp / 60_000) of the most recent step
    last_active_minute: Option<u64>,
}

/// kcal per step, flat estimate
const CALORIES_PER_STEP: f32 = 0.04;
/// km per step, flat estimate (~0.7 m stride)
const KM_PER_STEP: f32 = 0.0007;

impl ActivityStats {
    pub const fn new() -> Self {
        Self {
            steps: 0,
            calories: 0.0,
            distance_km: 0.0,
            active_minutes: 0,
            last_active_minute: None,
        }
    }

    /// Fold one step into the totals
    pub fn record_step(&mut self, timestamp_ms: u64) {
        self.steps += 1;
        self.calories += CALORIES_PER_STEP;
        self.distance_km += KM_PER_STEP;

        let minute = timestamp_ms / 60_000;
        if self.last_active_minute != Some(minute) {
            self.active_minutes += 1;
            self.last_active_minute = Some(minute);
        }
    }

    /// Midnight rollover
    pub fn reset_daily(&mut self) {
        *self = Self::new();
    }
}
