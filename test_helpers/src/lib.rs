//! Test helpers shared across crates.
//!
//! [`sinks`] records what the generation driver reports and writes, and
//! [`trees`] builds nested trees from JSON literals.

pub mod sinks;
pub mod trees;
