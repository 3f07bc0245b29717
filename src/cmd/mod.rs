//! Presentation-layer command handlers, one per mode.

pub mod batch;
pub mod interactive;
pub mod single;
pub mod tdd;
