//! Adapters for external systems.

pub mod oracles;
