//! Serialisation emitter.
//!
//! Walks the fields of a class in declaration order and emits statements
//! that place each value into a nested tree. Every distinct path prefix gets
//! exactly one branch variable, cached for the duration of one class.
//!
//! A branch is declared the first time its prefix is seen and filled by
//! later statements. Branches are moved into their parents only after every
//! leaf has been placed, in reverse creation order: a child is always
//! created after its parent, so each branch is complete when it is moved.

use std::collections::HashMap;

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::model::{ClassModel, FieldModel};
use crate::path;

/// A branch to be inserted into its parent once filled.
struct Attachment {
    parent: Ident,
    key: String,
    branch: Ident,
}

/// Branch variables created while walking one class.
struct BranchCache<'a> {
    krate: &'a TokenStream,
    root: Ident,
    branches: HashMap<String, Ident>,
    attachments: Vec<Attachment>,
    statements: Vec<TokenStream>,
}

impl<'a> BranchCache<'a> {
    fn new(root: Ident, krate: &'a TokenStream) -> Self {
        Self {
            krate,
            root,
            branches: HashMap::new(),
            attachments: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// Emits the statements placing `field` of `source` into the tree.
    fn place(&mut self, field: &FieldModel, source: &Ident) {
        let mut parent = self.root.clone();
        for occurrence in 1..=field.depth() {
            let (prefix, _) = path::split_at_occurrence(&field.name, occurrence);
            parent = self.branch_for(prefix, parent);
        }
        let krate = self.krate;
        let leaf = field.leaf();
        let ident = &field.ident;
        let dotted = field.dotted_path();
        self.statements.push(quote! {
            #parent.insert(
                ::std::string::String::from(#leaf),
                #krate::codec::to_value(&#source.#ident, #dotted)?,
            );
        });
    }

    /// Returns the branch variable for `prefix`, declaring it on first use.
    fn branch_for(&mut self, prefix: &str, parent: Ident) -> Ident {
        if let Some(existing) = self.branches.get(prefix) {
            return existing.clone();
        }
        let krate = self.krate;
        let branch = format_ident!("map{}", self.branches.len());
        self.statements.push(quote! {
            let mut #branch = #krate::Tree::new();
        });
        self.attachments.push(Attachment {
            parent,
            key: path::trailing_segment(prefix).to_owned(),
            branch: branch.clone(),
        });
        self.branches.insert(prefix.to_owned(), branch.clone());
        branch
    }

    fn finish(self) -> TokenStream {
        let Self {
            krate,
            root,
            attachments,
            statements,
            ..
        } = self;
        let declare_root = if statements.is_empty() {
            quote! { let #root = #krate::Tree::new(); }
        } else {
            quote! { let mut #root = #krate::Tree::new(); }
        };
        let attach = attachments.iter().rev().map(|attachment| {
            let Attachment {
                parent,
                key,
                branch,
            } = attachment;
            quote! {
                #parent.insert(::std::string::String::from(#key), #krate::Value::Object(#branch));
            }
        });
        quote! {
            #declare_root
            #( #statements )*
            #( #attach )*
            ::core::result::Result::Ok(#root)
        }
    }
}

/// Emits the body of `serialize`, reading fields from `source`.
///
/// The body evaluates to `Result<Tree, CodecError>`.
pub(crate) fn emit_serialize(class: &ClassModel, source: &Ident, krate: &TokenStream) -> TokenStream {
    let mut cache = BranchCache::new(format_ident!("map"), krate);
    for field in &class.fields {
        cache.place(field, source);
    }
    cache.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rstest::rstest;
    use syn::{DeriveInput, parse_quote};

    fn body(input: &DeriveInput) -> Result<String> {
        let class = ClassModel::from_derive_input(input, &[], None)?;
        let krate = quote! { ::config_yml };
        Ok(emit_serialize(&class, &format_ident!("to_serialize"), &krate).to_string())
    }

    fn normalise(tokens: &TokenStream) -> String {
        tokens.to_string()
    }

    #[rstest]
    fn flat_fields_write_to_root() -> Result<()> {
        let emitted = body(&parse_quote! {
            pub struct Flat { pub port: u16, pub motd: String }
        })?;
        let expected = normalise(&quote! {
            let mut map = ::config_yml::Tree::new();
            map.insert(
                ::std::string::String::from("port"),
                ::config_yml::codec::to_value(&to_serialize.port, "port")?,
            );
            map.insert(
                ::std::string::String::from("motd"),
                ::config_yml::codec::to_value(&to_serialize.motd, "motd")?,
            );
            ::core::result::Result::Ok(map)
        });
        assert_eq!(emitted, expected);
        Ok(())
    }

    #[rstest]
    fn shared_prefix_declares_one_branch() -> Result<()> {
        let emitted = body(&parse_quote! {
            pub struct Server { pub port: u16, pub db_host: String, pub db_port: u16 }
        })?;
        let expected = normalise(&quote! {
            let mut map = ::config_yml::Tree::new();
            map.insert(
                ::std::string::String::from("port"),
                ::config_yml::codec::to_value(&to_serialize.port, "port")?,
            );
            let mut map0 = ::config_yml::Tree::new();
            map0.insert(
                ::std::string::String::from("host"),
                ::config_yml::codec::to_value(&to_serialize.db_host, "db.host")?,
            );
            map0.insert(
                ::std::string::String::from("port"),
                ::config_yml::codec::to_value(&to_serialize.db_port, "db.port")?,
            );
            map.insert(::std::string::String::from("db"), ::config_yml::Value::Object(map0));
            ::core::result::Result::Ok(map)
        });
        assert_eq!(emitted, expected);
        Ok(())
    }

    #[rstest]
    fn nested_branches_attach_children_first() -> Result<()> {
        let emitted = body(&parse_quote! {
            pub struct Deep { pub db_pool_size: u8, pub db_host: String, pub log_level: String }
        })?;
        assert_eq!(emitted.matches("let mut map0").count(), 1);
        assert_eq!(emitted.matches("let mut map1").count(), 1);
        assert_eq!(emitted.matches("let mut map2").count(), 1);
        assert!(!emitted.contains("map3"));

        let pool_into_db = emitted
            .find("map0 . insert (:: std :: string :: String :: from (\"pool\")")
            .ok_or_else(|| anyhow::anyhow!("pool attachment missing: {emitted}"))?;
        let db_into_root = emitted
            .find("map . insert (:: std :: string :: String :: from (\"db\")")
            .ok_or_else(|| anyhow::anyhow!("db attachment missing: {emitted}"))?;
        assert!(pool_into_db < db_into_root);
        Ok(())
    }

    #[rstest]
    fn branch_cache_is_fresh_per_class() -> Result<()> {
        let first = body(&parse_quote! { pub struct A { pub db_host: String } })?;
        let second = body(&parse_quote! { pub struct B { pub db_host: String } })?;
        assert_eq!(first, second);
        assert!(second.contains("let mut map0"));
        Ok(())
    }

    #[rstest]
    fn empty_class_returns_immutable_root() -> Result<()> {
        let emitted = body(&parse_quote! { pub struct Empty { hidden: u8 } })?;
        let expected = normalise(&quote! {
            let map = ::config_yml::Tree::new();
            ::core::result::Result::Ok(map)
        });
        assert_eq!(emitted, expected);
        Ok(())
    }
}
