//! Token emitters for the generated codec.
//!
//! [`builder`] lays fields out as a nested tree, [`reader`] reads them back
//! with recovery, and [`codec`] assembles both into one unit.

mod builder;
mod codec;
mod crate_path;
mod reader;

pub use codec::emit_codec;
