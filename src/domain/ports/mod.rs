//! Port trait definitions (Hexagonal Architecture)
//!
//! The only external capability the engine consumes is the decomposition
//! oracle. Adapters in `crate::adapters::oracles` implement it.

pub mod oracle;

pub use oracle::DecompositionOracle;
