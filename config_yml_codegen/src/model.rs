//! Class and field models built from an annotated item.
//!
//! A [`ClassModel`] is the only input the validator and emitters see. It is
//! built once per candidate from the parsed item, so the generation
//! algorithm does not depend on how the metadata was obtained.

use quote::format_ident;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Type, Visibility};

use crate::attrs::{derives, parse_field_attrs, parse_struct_attrs};
use crate::error::GenerateError;
use crate::path;

/// How a field's declared type is treated when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    /// `String`: values are sanitised before assignment.
    Text,
    /// Any other type: values are assigned as cast.
    Plain,
}

impl DeclaredType {
    /// Classifies a field type.
    ///
    /// Only a bare `String` path (optionally qualified, without generic
    /// arguments) is sanitisable.
    #[must_use]
    pub fn of(ty: &Type) -> Self {
        let Type::Path(type_path) = ty else {
            return Self::Plain;
        };
        if type_path.qself.is_some() {
            return Self::Plain;
        }
        match type_path.path.segments.last() {
            Some(last) if last.ident == "String" && last.arguments.is_none() => Self::Text,
            _ => Self::Plain,
        }
    }
}

/// One eligible field of a class.
#[derive(Debug, Clone)]
pub struct FieldModel {
    /// Field identifier as written in the struct.
    pub ident: Ident,
    /// Unraw field name, possibly containing delimiters.
    pub name: String,
    /// `name` split on every delimiter.
    pub segments: Vec<String>,
    /// Declared field type.
    pub ty: Type,
    /// Sanitisation class of `ty`.
    pub declared: DeclaredType,
}

impl FieldModel {
    /// Builds the model of a field named `ident` with type `ty`.
    #[must_use]
    pub fn new(ident: Ident, ty: Type) -> Self {
        let name = ident.unraw().to_string();
        let segments = path::segments(&name);
        let declared = DeclaredType::of(&ty);
        Self {
            ident,
            name,
            segments,
            ty,
            declared,
        }
    }

    /// Number of branches above the leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Key of the leaf inside its deepest branch.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.segments.last().map_or(self.name.as_str(), String::as_str)
    }

    /// Path rendered with dots, used for diagnostics and persistence.
    #[must_use]
    pub fn dotted_path(&self) -> String {
        path::dotted(&self.name)
    }

    /// Returns `true` when values must be sanitised before assignment.
    #[must_use]
    pub fn is_sanitized(&self) -> bool {
        self.declared == DeclaredType::Text
    }
}

/// How a class obtains a default-constructed instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constructor {
    /// `<T as Default>::default()`.
    Default,
    /// A zero-argument associated function, such as `T::new()`.
    Named(Ident),
}

/// The eligible fields and identity of one annotated struct.
#[derive(Debug, Clone)]
pub struct ClassModel {
    /// Module path and name, joined with `::`.
    pub qualified_name: String,
    /// Struct identifier.
    pub simple_name: Ident,
    /// Enclosing module path, if the struct is not at a crate root.
    pub package_name: Option<String>,
    /// Visibility given to the generated codec.
    pub visibility: Visibility,
    /// Eligible fields in declaration order.
    pub fields: Vec<FieldModel>,
    /// How an instance is default-constructed, if it can be.
    pub constructor: Option<Constructor>,
    /// Runtime crate path override.
    pub crate_path: Option<syn::Path>,
}

impl ClassModel {
    /// Builds the model of `input`.
    ///
    /// `module_path` locates the item inside its crate and only feeds the
    /// qualified name. `discovered` is constructor evidence found outside the
    /// item itself, such as an `impl Default` in the same file.
    ///
    /// Fields are eligible unless they are private (inherited visibility) or
    /// marked `#[config_yml(skip)]`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidTargetKind`] when `input` is not a
    /// non-generic struct with named fields, and
    /// [`GenerateError::Attribute`] for malformed `#[config_yml]` attributes.
    pub fn from_derive_input(
        input: &DeriveInput,
        module_path: &[String],
        discovered: Option<Constructor>,
    ) -> Result<Self, GenerateError> {
        let package_name = (!module_path.is_empty()).then(|| module_path.join("::"));
        let qualified_name = package_name.as_ref().map_or_else(
            || input.ident.to_string(),
            |package| format!("{package}::{}", input.ident),
        );

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) => return Err(invalid_target(qualified_name, "a tuple struct")),
                Fields::Unit => return Err(invalid_target(qualified_name, "a unit struct")),
            },
            Data::Enum(_) => return Err(invalid_target(qualified_name, "an enum")),
            Data::Union(_) => return Err(invalid_target(qualified_name, "a union")),
        };
        if !input.generics.params.is_empty() {
            return Err(invalid_target(qualified_name, "a generic struct"));
        }

        let struct_attrs = parse_struct_attrs(&input.attrs)?;
        let constructor = struct_attrs
            .constructor
            .map(Constructor::Named)
            .or_else(|| derives(&input.attrs, "Default").then_some(Constructor::Default))
            .or(discovered);

        let mut fields = Vec::new();
        for field in &named.named {
            let attrs = parse_field_attrs(&field.attrs)?;
            if attrs.skip || matches!(field.vis, Visibility::Inherited) {
                continue;
            }
            let Some(ident) = field.ident.clone() else {
                continue;
            };
            fields.push(FieldModel::new(ident, field.ty.clone()));
        }

        Ok(Self {
            qualified_name,
            simple_name: input.ident.clone(),
            package_name,
            visibility: input.vis.clone(),
            fields,
            constructor,
            crate_path: struct_attrs.crate_path,
        })
    }

    /// Returns `true` when an instance can be built without arguments.
    #[must_use]
    pub const fn has_default_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Name of the generated codec type, `<Struct>Serializator`.
    #[must_use]
    pub fn serializator_ident(&self) -> Ident {
        format_ident!("{}Serializator", self.simple_name)
    }

    /// Looks a field up by its unraw name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }
}

fn invalid_target(class: String, found: &'static str) -> GenerateError {
    GenerateError::InvalidTargetKind { class, found }
}
