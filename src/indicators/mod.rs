pub mod engine;

pub mod momentum;
pub mod trend;
pub mod volume;

pub use engine::*;
