//! Configuration types
//!
//! Board-agnostic configuration structures. Persisted blobs (touch
//! calibration, user settings) are stored as postcard binary data when
//! the `serde` feature is enabled.

pub mod calibration;
pub mod types;

pub use calibration::*;
pub use types::*;
