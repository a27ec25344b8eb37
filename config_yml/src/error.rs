//! Errors surfaced by generated codecs and the YAML persistence handle.

use thiserror::Error;

/// Result alias used throughout the runtime.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while converting between structs and trees.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// A field value could not be represented as a tree value.
    #[error("failed to serialise value at '{path}': {source}")]
    Serialize {
        /// Dotted path of the offending field.
        path: String,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// The defaults tree held a malformed value for a field being recovered.
    #[error("default value at '{path}' has wrong type: {source}")]
    InvalidDefault {
        /// Dotted path of the offending field.
        path: String,
        /// Underlying cast error.
        #[source]
        source: serde_json::Error,
    },

    /// A YAML document could not be parsed or emitted.
    #[cfg(feature = "yaml")]
    #[error("YAML error in '{path}': {source}")]
    Yaml {
        /// File or label of the document.
        path: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A YAML document did not have a mapping at its root.
    #[error("document '{path}' must contain a mapping at its root")]
    NotAMapping {
        /// File or label of the document.
        path: String,
    },

    /// Reading or writing a document failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that triggered the failure.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
