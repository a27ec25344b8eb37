//! Helpers invoked by generated `Serializator` code.
//!
//! Generated injection code reads each field twice at most: once from the
//! primary tree and, when that value is malformed, once from the defaults
//! tree. The functions below implement the pieces shared by every field so
//! the emitted statements stay small: [`cast`] performs the type check,
//! [`sanitize`] rewrites string values, [`report_wrong_value`] logs the fixed
//! diagnostic, and [`persist`] writes a recovered default back.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CodecError;
use crate::tree::Tree;

/// Character replaced in string values read from a tree.
pub const SANITIZE_FROM: char = '&';

/// Reserved marker substituted for [`SANITIZE_FROM`].
pub const SANITIZE_TO: &str = "§";

static NULL: Value = Value::Null;

/// Sink receiving corrected values at a dotted path.
///
/// Implemented by [`Tree`] and, with the `yaml` feature, by
/// [`crate::YamlConfiguration`].
pub trait PersistHandle {
    /// Stores `value` at the dotted `path`, replacing what was there.
    fn set(&mut self, path: &str, value: Value);
}

/// Codec between a struct and its nested [`Tree`] form.
///
/// `#[derive(ConfigYml)]` implements this trait on the generated
/// `<Struct>Serializator` type, which also exposes the same functions as
/// inherent associated functions.
pub trait Serializator {
    /// Struct handled by the codec.
    type Target;

    /// Flattens `value` into a nested tree.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Serialize`] when a field cannot be represented
    /// as a tree value.
    fn serialize(value: &Self::Target) -> Result<Tree, CodecError>;

    /// Builds a default-constructed target and injects `map` into it.
    ///
    /// # Errors
    ///
    /// Never fails without a defaults tree; the signature mirrors
    /// [`Serializator::inject_to_with_defaults`].
    fn deserialize(map: &Tree) -> Result<Self::Target, CodecError>;

    /// Injects `map` into `target`, leaving malformed fields untouched.
    ///
    /// # Errors
    ///
    /// See [`Serializator::deserialize`].
    fn inject_to(target: &mut Self::Target, map: &Tree) -> Result<(), CodecError>;

    /// Injects `map` into `target`, recovering malformed fields from
    /// `default_map` and persisting the recovered values through `yml`.
    ///
    /// Recovery only happens when both `default_map` and `yml` are supplied.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidDefault`] when the defaults tree is also
    /// malformed at a recovered path, or [`CodecError::Serialize`] when the
    /// recovered value cannot be persisted.
    fn inject_to_with_defaults(
        target: &mut Self::Target,
        map: &Tree,
        default_map: Option<&Tree>,
        yml: Option<&mut dyn PersistHandle>,
    ) -> Result<(), CodecError>;
}

/// Casts a value read from a tree into `T`.
///
/// A missing value is read as `null`, so `Option<T>` targets yield `None`
/// while other targets fail the cast.
///
/// # Errors
///
/// Returns the deserialisation error when the value has the wrong shape.
///
/// # Examples
///
/// ```rust
/// use config_yml::{Value, codec::cast};
///
/// assert_eq!(cast::<u16>(Some(&Value::from(5432))).ok(), Some(5432));
/// assert!(cast::<u16>(Some(&Value::from("not-a-number"))).is_err());
/// assert!(cast::<u16>(None).is_err());
/// assert_eq!(cast::<Option<u16>>(None).ok(), Some(None));
/// ```
pub fn cast<T: DeserializeOwned>(value: Option<&Value>) -> Result<T, serde_json::Error> {
    T::deserialize(value.unwrap_or(&NULL))
}

/// Replaces every [`SANITIZE_FROM`] with [`SANITIZE_TO`].
///
/// # Examples
///
/// ```rust
/// assert_eq!(config_yml::codec::sanitize("He&&o".to_owned()), "He§§o");
/// ```
#[must_use]
pub fn sanitize(value: String) -> String {
    if value.contains(SANITIZE_FROM) {
        value.replace(SANITIZE_FROM, SANITIZE_TO)
    } else {
        value
    }
}

/// Converts a field value into a tree value.
///
/// # Errors
///
/// Returns [`CodecError::Serialize`] naming `path` when serialisation fails.
pub fn to_value<T: Serialize + ?Sized>(value: &T, path: &str) -> Result<Value, CodecError> {
    serde_json::to_value(value).map_err(|source| CodecError::Serialize {
        path: path.to_owned(),
        source,
    })
}

/// Logs that the primary tree holds a malformed value at `path`.
pub fn report_wrong_value(path: &str, cause: &serde_json::Error) {
    tracing::warn!(target: "config_yml", error = %cause, "{path} path has wrong value");
}

/// Maps a malformed default into [`CodecError::InvalidDefault`].
#[must_use]
pub fn invalid_default(path: &str, source: serde_json::Error) -> CodecError {
    CodecError::InvalidDefault {
        path: path.to_owned(),
        source,
    }
}

/// Writes a recovered default back through the persistence handle.
pub fn persist(handle: &mut dyn PersistHandle, path: &str, value: Value) {
    tracing::debug!(target: "config_yml", path, "persisting recovered default");
    handle.set(path, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::doubled("He&&o", "He§§o")]
    #[case::untouched("plain", "plain")]
    #[case::only("&", "§")]
    #[case::empty("", "")]
    fn sanitize_replaces_ampersands(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input.to_owned()), expected);
    }

    #[rstest]
    fn cast_reports_wrong_type() {
        let value = json!("not-a-number");
        assert!(cast::<u16>(Some(&value)).is_err());
    }

    #[rstest]
    fn cast_reads_strings_and_options() {
        let value = json!("local");
        assert_eq!(cast::<String>(Some(&value)).ok().as_deref(), Some("local"));
        assert_eq!(cast::<Option<String>>(None).ok(), Some(None));
    }

    #[rstest]
    fn to_value_names_path_on_failure() {
        let mut keyed = std::collections::BTreeMap::new();
        keyed.insert((1_u8, 2_u8), 3_u8);
        let err = to_value(&keyed, "db.pool");
        assert!(matches!(err, Err(CodecError::Serialize { ref path, .. }) if path == "db.pool"));
    }

    #[rstest]
    fn persist_writes_through_handle() {
        let mut tree = Tree::new();
        persist(&mut tree, "db.port", json!(5432));
        assert_eq!(crate::get_path(&tree, "db.port"), Some(&json!(5432)));
    }
}
