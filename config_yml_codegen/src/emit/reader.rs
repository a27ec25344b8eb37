//! Deserialisation and injection emitter.
//!
//! For every field the emitted code reads the primary tree, casts the value
//! to the declared type and assigns it. A failed cast is reported with the
//! field's dotted path; when a defaults tree and a persistence handle are
//! both present, the same path is read from the defaults tree, assigned, and
//! written back through the handle.
//!
//! Both trees are plain nested maps and are descended the same way: one
//! `branch` lookup per intermediate segment, then a leaf lookup.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::model::{ClassModel, Constructor, FieldModel};
use crate::path;

/// Variable names the injection body refers to.
pub(crate) struct InjectVars {
    pub target: Ident,
    pub primary: Ident,
    pub defaults: Ident,
    pub handle: Ident,
}

impl Default for InjectVars {
    fn default() -> Self {
        Self {
            target: format_ident!("to_inject"),
            primary: format_ident!("map"),
            defaults: format_ident!("default_map"),
            handle: format_ident!("yml"),
        }
    }
}

/// Emits an expression of type `Option<&Value>` reading `field` from
/// `container`, one segment at a time.
pub(crate) fn emit_descent(container: &Ident, field: &FieldModel, krate: &TokenStream) -> TokenStream {
    let leaf = field.leaf();
    if field.depth() == 0 {
        return quote! { #container.get(#leaf) };
    }
    let steps = (1..=field.depth()).map(|occurrence| {
        let (prefix, _) = path::split_at_occurrence(&field.name, occurrence);
        let key = path::trailing_segment(prefix);
        quote! { .and_then(|node| #krate::branch(node, #key)) }
    });
    quote! {
        ::core::option::Option::Some(#container)
            #( #steps )*
            .and_then(|node| node.get(#leaf))
    }
}

/// Wraps `value` in the sanitisation call when the field needs it.
fn assigned(field: &FieldModel, value: &Ident, krate: &TokenStream) -> TokenStream {
    if field.is_sanitized() {
        quote! { #krate::codec::sanitize(#value) }
    } else {
        quote! { #value }
    }
}

fn emit_field(field: &FieldModel, vars: &InjectVars, krate: &TokenStream) -> TokenStream {
    let InjectVars {
        target,
        primary,
        defaults,
        handle,
    } = vars;
    let ident = &field.ident;
    let ty = &field.ty;
    let dotted = field.dotted_path();
    let value = format_ident!("value");
    let temp = format_ident!("temp");
    let fallback_map = format_ident!("fallback");
    let primary_read = emit_descent(primary, field, krate);
    let fallback_read = emit_descent(&fallback_map, field, krate);
    let assign_value = assigned(field, &value, krate);
    let assign_temp = assigned(field, &temp, krate);

    quote! {
        match #krate::codec::cast::<#ty>(#primary_read) {
            ::core::result::Result::Ok(#value) => #target.#ident = #assign_value,
            ::core::result::Result::Err(cause) => {
                #krate::codec::report_wrong_value(#dotted, &cause);
                if let (
                    ::core::option::Option::Some(#fallback_map),
                    ::core::option::Option::Some(handle),
                ) = (#defaults, #handle.as_deref_mut())
                {
                    let #temp = #krate::codec::cast::<#ty>(#fallback_read)
                        .map_err(|source| #krate::codec::invalid_default(#dotted, source))?;
                    let persisted = #krate::codec::to_value(&#temp, #dotted)?;
                    #target.#ident = #assign_temp;
                    #krate::codec::persist(handle, #dotted, persisted);
                }
            }
        }
    }
}

/// Emits the body of `inject_to_with_defaults`.
///
/// The body evaluates to `Result<(), CodecError>`. A class without fields
/// only touches its parameters so the generated function stays warning-free.
pub(crate) fn emit_inject(class: &ClassModel, vars: &InjectVars, krate: &TokenStream) -> TokenStream {
    if class.fields.is_empty() {
        let InjectVars {
            target,
            primary,
            defaults,
            handle,
        } = vars;
        return quote! {
            let _ = (#target, #primary, #defaults, #handle);
            ::core::result::Result::Ok(())
        };
    }
    let fields = class.fields.iter().map(|field| emit_field(field, vars, krate));
    quote! {
        #( #fields )*
        ::core::result::Result::Ok(())
    }
}

/// Emits the body of `deserialize`: construct, inject, return.
pub(crate) fn emit_deserialize(class: &ClassModel, constructor: &Constructor) -> TokenStream {
    let name = &class.simple_name;
    let construct = match constructor {
        Constructor::Default => quote! { <#name as ::core::default::Default>::default() },
        Constructor::Named(function) => quote! { #name::#function() },
    };
    quote! {
        let mut to_create = #construct;
        Self::inject_to(&mut to_create, map)?;
        ::core::result::Result::Ok(to_create)
    }
}
