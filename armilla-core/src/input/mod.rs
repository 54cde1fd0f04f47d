//! Touch input pipeline
//!
//! Raw touch samples come in from the touch controller at whatever rate
//! the navigation loop polls; the classifier turns them into discrete
//! gesture events.

pub mod classifier;
pub mod gesture;

pub use classifier::{GestureClassifier, GestureConfig};
pub use gesture::{GestureEvent, GestureKind, TouchSample};
