//! Pre-generation checks on a [`ClassModel`].
//!
//! A class is generated only when it can be default-constructed and its
//! field names describe an unambiguous tree: no field may sit where another
//! field needs a branch, and no path may contain an empty segment.

use std::collections::HashMap;

use crate::error::GenerateError;
use crate::model::ClassModel;
use crate::path;

/// Runs every check in order, stopping at the first failure.
///
/// # Errors
///
/// Returns [`GenerateError::MissingDefaultConstructor`],
/// [`GenerateError::EmptyPathSegment`] or
/// [`GenerateError::AmbiguousFieldNaming`].
pub fn validate(class: &ClassModel) -> Result<(), GenerateError> {
    if !has_default_constructor(class) {
        return Err(GenerateError::MissingDefaultConstructor {
            class: class.qualified_name.clone(),
        });
    }
    if let Some(field) = class
        .fields
        .iter()
        .find(|field| field.segments.iter().any(String::is_empty))
    {
        return Err(GenerateError::EmptyPathSegment {
            class: class.qualified_name.clone(),
            field: field.name.clone(),
        });
    }
    let forbidden = forbidden_names(class);
    if let Some((field, owner)) = class
        .fields
        .iter()
        .find_map(|field| forbidden.get(field.name.as_str()).map(|owner| (field, owner)))
    {
        return Err(GenerateError::AmbiguousFieldNaming {
            class: class.qualified_name.clone(),
            field: field.name.clone(),
            conflicts_with: (*owner).to_owned(),
        });
    }
    Ok(())
}

/// Returns `true` when the class can be built without arguments.
#[must_use]
pub const fn has_default_constructor(class: &ClassModel) -> bool {
    class.has_default_constructor()
}

/// Maps every proper path prefix to the first field whose path needs it.
///
/// A field whose bare name appears as a key here would have to be both a
/// leaf and a branch.
#[must_use]
pub fn forbidden_names(class: &ClassModel) -> HashMap<&str, &str> {
    let mut forbidden = HashMap::new();
    for field in &class.fields {
        for prefix in path::prefixes(&field.name) {
            forbidden.entry(prefix).or_insert(field.name.as_str());
        }
    }
    forbidden
}
