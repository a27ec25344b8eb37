//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[config_yml(crate = "...")]` attribute value into
//! the tokens that prefix every runtime item referenced by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the runtime crate path.
///
/// Defaults to `::config_yml` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::config_yml }, |path| quote! { #path })
}
