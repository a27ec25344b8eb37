//! Error types for `cargo-configyml`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `cargo-configyml` pipeline.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading sources or writing artifacts failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Parser error.
        #[source]
        source: syn::Error,
    },

    /// At least one class was skipped; each was reported as a diagnostic.
    #[error("{count} class(es) failed to generate: {classes}")]
    GenerationFailed {
        /// Number of skipped classes.
        count: usize,
        /// Their qualified names, comma separated.
        classes: String,
    },
}

impl CliError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
