//! Board-agnostic core logic for the Armilla wrist-watch firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (touch source, accel source, display)
//! - Gesture classification from raw touch samples
//! - Step detection from accelerometer samples
//! - App registry and capability tables
//! - Screen navigation state machine
//! - Configuration and calibration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod apps;
pub mod config;
pub mod context;
pub mod input;
pub mod motion;
pub mod nav;
pub mod traits;
