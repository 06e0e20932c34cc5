//! Small shared helpers.

pub mod format;
pub mod math;
