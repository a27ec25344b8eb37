//! Generation-time failures.
//!
//! Every variant is scoped to one class: a batch reports it and carries on
//! with the next candidate.

use proc_macro2::Span;
use syn::DeriveInput;
use syn::ext::IdentExt;
use thiserror::Error;

/// Errors raised while generating the codec of one class.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The annotated item is not a non-generic struct with named fields.
    #[error("ConfigYml may only be derived for structs with named fields; `{class}` is {found}")]
    InvalidTargetKind {
        /// Qualified name of the item.
        class: String,
        /// Short description of what the item is instead.
        found: &'static str,
    },

    /// The class cannot be constructed without arguments.
    #[error(
        "{class} must have default constructor; derive `Default` or name one with \
         #[config_yml(constructor = \"...\")]"
    )]
    MissingDefaultConstructor {
        /// Qualified name of the class.
        class: String,
    },

    /// A field name is also a branch on another field's path.
    #[error(
        "{class} has invalid field name `{field}`: it is also a branch of `{conflicts_with}`"
    )]
    AmbiguousFieldNaming {
        /// Qualified name of the class.
        class: String,
        /// Field whose name collides.
        field: String,
        /// Field whose path passes through `field`.
        conflicts_with: String,
    },

    /// A field name starts, ends, or is interrupted by an empty segment.
    #[error("{class} has invalid field name `{field}`: path segments must not be empty")]
    EmptyPathSegment {
        /// Qualified name of the class.
        class: String,
        /// Offending field.
        field: String,
    },

    /// A `#[config_yml(...)]` attribute could not be parsed.
    #[error("invalid #[config_yml] attribute: {0}")]
    Attribute(#[from] syn::Error),

    /// The generated tokens did not form a valid source file.
    #[error("generated code for {class} is not valid Rust: {source}")]
    Render {
        /// Qualified name of the class.
        class: String,
        /// Parser error.
        #[source]
        source: syn::Error,
    },

    /// The output sink rejected the generated text.
    #[error("could not write output for class {class}: {source}")]
    OutputWriteFailure {
        /// Qualified name of the class.
        class: String,
        /// Sink error.
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Converts the error into a `syn::Error` pointing into `input`.
    ///
    /// Field-naming errors point at the offending field; everything else
    /// points at the item name.
    #[must_use]
    pub fn to_syn_error(&self, input: &DeriveInput) -> syn::Error {
        match self {
            Self::Attribute(inner) => inner.clone(),
            Self::AmbiguousFieldNaming { field, .. } | Self::EmptyPathSegment { field, .. } => {
                syn::Error::new(field_span(input, field), self.to_string())
            }
            _ => syn::Error::new(input.ident.span(), self.to_string()),
        }
    }
}

fn field_span(input: &DeriveInput, name: &str) -> Span {
    let syn::Data::Struct(data) = &input.data else {
        return input.ident.span();
    };
    data.fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| ident.unraw() == name)
        .map_or_else(|| input.ident.span(), proc_macro2::Ident::span)
}
