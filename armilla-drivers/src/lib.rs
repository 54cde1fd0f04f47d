//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in armilla-core for the watch's sensors:
//!
//! - Touch controller (FT3168 capacitive panel, I2C)
//! - Inertial measurement unit (QMI8658 accelerometer, I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod imu;
pub mod touch;
