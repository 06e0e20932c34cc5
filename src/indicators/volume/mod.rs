//! Volume indicators: rolling average volume

pub mod avg_volume;

pub use avg_volume::*;
