//! Builders for nested trees used as codec input.

use anyhow::{Result, anyhow};
use serde_json::{Map, Value};

/// Converts a JSON object literal into a tree.
///
/// # Errors
///
/// Returns an error when `value` is not an object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use config_yml_test_helpers::trees::tree;
///
/// # fn main() -> anyhow::Result<()> {
/// let map = tree(json!({ "db": { "port": 5432 } }))?;
/// assert!(map.contains_key("db"));
/// # Ok(())
/// # }
/// ```
pub fn tree(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("expected a JSON object, found {other}")),
    }
}
