//! Parsing of `#[config_yml(...)]` and `#[derive(...)]` attributes.

use syn::punctuated::Punctuated;
use syn::{Attribute, Lit, LitStr, Token, parenthesized};

/// Struct-level `#[config_yml(...)]` settings.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the runtime crate path referenced by generated code.
    pub crate_path: Option<syn::Path>,
    /// Zero-argument associated function used to construct the struct.
    pub constructor: Option<syn::Ident>,
}

/// Field-level `#[config_yml(...)]` settings.
#[derive(Default, Clone, Copy)]
pub(crate) struct FieldAttrs {
    /// Excludes the field from the codec.
    pub skip: bool,
}

/// Iterate all `#[config_yml(...)]` attributes once and apply a callback.
fn parse_config_yml<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("config_yml")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}

/// Extracts `#[config_yml(...)]` metadata applied to a struct.
///
/// Recognised keys are `crate` and `constructor`. Unknown keys are ignored
/// so older generators keep accepting newer annotations.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_config_yml(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            Some("constructor") => {
                let s = lit_str(meta, "constructor")?;
                let ident: syn::Ident =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.constructor = Some(ident);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[config_yml(...)]` attributes.
///
/// `skip` and `skip = true|false` are recognised; other keys are ignored.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_config_yml(attrs, |meta| {
        if meta.path.is_ident("skip") {
            out.skip = if meta.input.peek(Token![=]) {
                meta.value()?.parse::<syn::LitBool>()?.value
            } else {
                true
            };
            return Ok(());
        }
        discard_unknown(meta)
    })?;
    Ok(out)
}

/// Returns `true` when `attrs` contain a `#[derive(...)]` listing `name`.
///
/// Paths are matched on their final segment, so `Default` and
/// `core::default::Default` both count.
#[must_use]
pub fn derives(attrs: &[Attribute], name: &str) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .any(|path| path.segments.last().is_some_and(|segment| segment.ident == name))
}
