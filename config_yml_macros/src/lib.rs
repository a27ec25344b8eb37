//! Procedural macros for `config_yml`.
//!
//! The [`ConfigYml`] derive generates a `<Struct>Serializator` companion type
//! next to the annotated struct. Generation itself lives in
//! `config_yml_codegen`; this crate only parses the item and turns generation
//! errors into compile errors that point at the offending struct or field.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use config_yml_codegen::{Candidate, generate};

/// Derive macro for a `<Struct>Serializator` codec.
///
/// Field names are split on `_` into tree paths: `db_port` is stored at
/// `db.port`. Only fields that are not private and not marked
/// `#[config_yml(skip)]` take part.
///
/// Struct attributes:
///
/// - `#[config_yml(constructor = "new")]` names a zero-argument associated
///   function used instead of `Default::default()`. Without it the struct
///   must implement `Default`.
/// - `#[config_yml(crate = "path")]` names the runtime crate when it has been
///   renamed.
#[proc_macro_derive(ConfigYml, attributes(config_yml))]
pub fn derive_config_yml(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    let candidate = Candidate::for_derive(item);
    match generate(&candidate) {
        Ok(artifact) => artifact.tokens.into(),
        Err(error) => error.to_syn_error(candidate.input()).to_compile_error().into(),
    }
}
