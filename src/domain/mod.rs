//! Domain layer for the Taskforge estimation engine
//!
//! This module contains the task/analysis/breakdown models, the error
//! taxonomy and the oracle port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
