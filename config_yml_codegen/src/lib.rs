//! Code generation core for `#[derive(ConfigYml)]`.
//!
//! Given an annotated struct, this crate produces the tokens of a companion
//! `<Struct>Serializator` type that converts between the struct and a nested
//! tree. Field names describe the nesting: every `_` opens a branch, so
//! `db_pool_size` is stored at `db.pool.size`.
//!
//! The pipeline is the same for every caller:
//!
//! 1. [`model::ClassModel`] collects the eligible fields of one struct.
//! 2. [`validate::validate`] rejects classes that cannot be constructed or
//!    whose field names describe an ambiguous tree.
//! 3. [`emit_codec`] emits the codec.
//!
//! [`driver`] wraps these steps for batches with isolated failures. The
//! derive macro feeds it a single candidate; `cargo-configyml` feeds it every
//! annotated struct it finds in a set of source files.

mod attrs;
pub mod driver;
mod emit;
pub mod error;
pub mod model;
pub mod path;
pub mod validate;

pub use attrs::derives;
pub use driver::{
    Artifact, BatchReport, Candidate, Diagnostic, DiagnosticSink, GENERATED_HEADER, OutputSink,
    Severity, TracingDiagnostics, generate, run_batch,
};
pub use emit::emit_codec;
pub use error::GenerateError;
pub use model::{ClassModel, Constructor, DeclaredType, FieldModel};
