//! Motion sensing: step detection and daily activity accumulation

pub mod activity;
pub mod steps;

pub use activity::ActivityStats;
pub use steps::{AccelSample, StepConfig, StepDetector, StepEvent};
