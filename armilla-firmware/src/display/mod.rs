//! Display backends

pub mod term;

pub use term::TermDisplay;
