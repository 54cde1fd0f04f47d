//! Inertial measurement unit drivers

pub mod qmi8658;

pub use qmi8658::{ImuError, Qmi8658};
