//! CLI command implementations.

pub mod analyze;
pub mod decompose;
pub mod duration;
pub mod experience;
