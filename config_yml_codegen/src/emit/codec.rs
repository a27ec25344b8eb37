//! Assembles the generated `<Struct>Serializator` unit.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::builder::emit_serialize;
use super::crate_path;
use super::reader::{InjectVars, emit_deserialize, emit_inject};
use crate::error::GenerateError;
use crate::model::ClassModel;

/// Emits the codec type, its four associated functions and its
/// `Serializator` implementation.
///
/// # Errors
///
/// Returns [`GenerateError::MissingDefaultConstructor`] when the class has no
/// constructor; validation normally rejects such classes earlier.
pub fn emit_codec(class: &ClassModel) -> Result<TokenStream, GenerateError> {
    let constructor =
        class
            .constructor
            .as_ref()
            .ok_or_else(|| GenerateError::MissingDefaultConstructor {
                class: class.qualified_name.clone(),
            })?;
    let krate = crate_path::resolve(class.crate_path.as_ref());
    let name = &class.simple_name;
    let codec = class.serializator_ident();
    let vis = &class.visibility;
    let vars = InjectVars::default();
    let InjectVars {
        target,
        primary,
        defaults,
        handle,
    } = &vars;
    let handle_binding = if class.fields.is_empty() {
        quote! { #handle }
    } else {
        quote! { mut #handle }
    };

    let serialize_body = emit_serialize(class, &format_ident!("to_serialize"), &krate);
    let deserialize_body = emit_deserialize(class, constructor);
    let inject_body = emit_inject(class, &vars, &krate);

    let type_doc = format!("Tree codec for [`{name}`], generated by `#[derive(ConfigYml)]`.");
    let serialize_doc = format!("Flattens a [`{name}`] into a nested tree.");
    let deserialize_doc = format!("Builds a default [`{name}`] and injects `map` into it.");

    Ok(quote! {
        #[doc = #type_doc]
        #[derive(
            ::core::fmt::Debug,
            ::core::clone::Clone,
            ::core::marker::Copy,
            ::core::default::Default,
        )]
        #vis struct #codec;

        impl #codec {
            #[doc = #serialize_doc]
            pub fn serialize(
                to_serialize: &#name,
            ) -> ::core::result::Result<#krate::Tree, #krate::CodecError> {
                #serialize_body
            }

            #[doc = #deserialize_doc]
            pub fn deserialize(
                map: &#krate::Tree,
            ) -> ::core::result::Result<#name, #krate::CodecError> {
                #deserialize_body
            }

            /// Injects `map`, leaving malformed fields untouched.
            pub fn inject_to(
                #target: &mut #name,
                #primary: &#krate::Tree,
            ) -> ::core::result::Result<(), #krate::CodecError> {
                Self::inject_to_with_defaults(
                    #target,
                    #primary,
                    ::core::option::Option::None,
                    ::core::option::Option::None,
                )
            }

            /// Injects `map`, recovering malformed fields from `default_map`
            /// and persisting the recovered values through `yml`.
            pub fn inject_to_with_defaults(
                #target: &mut #name,
                #primary: &#krate::Tree,
                #defaults: ::core::option::Option<&#krate::Tree>,
                #handle_binding: ::core::option::Option<&mut dyn #krate::PersistHandle>,
            ) -> ::core::result::Result<(), #krate::CodecError> {
                #inject_body
            }
        }

        impl #krate::Serializator for #codec {
            type Target = #name;

            fn serialize(
                value: &#name,
            ) -> ::core::result::Result<#krate::Tree, #krate::CodecError> {
                #codec::serialize(value)
            }

            fn deserialize(
                map: &#krate::Tree,
            ) -> ::core::result::Result<#name, #krate::CodecError> {
                #codec::deserialize(map)
            }

            fn inject_to(
                target: &mut #name,
                map: &#krate::Tree,
            ) -> ::core::result::Result<(), #krate::CodecError> {
                #codec::inject_to(target, map)
            }

            fn inject_to_with_defaults(
                target: &mut #name,
                map: &#krate::Tree,
                default_map: ::core::option::Option<&#krate::Tree>,
                yml: ::core::option::Option<&mut dyn #krate::PersistHandle>,
            ) -> ::core::result::Result<(), #krate::CodecError> {
                #codec::inject_to_with_defaults(target, map, default_map, yml)
            }
        }
    })
}
