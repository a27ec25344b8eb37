//! Nested key/value trees exchanged with generated codecs.
//!
//! A [`Tree`] is a string-keyed map whose values are either leaves or further
//! trees. Dotted paths (`db.port`) address values across nesting levels; they
//! are the form used for diagnostics and for persisted corrections.

use serde_json::Value;

use crate::codec::PersistHandle;

/// Separator used by dotted display and persistence paths.
pub const PATH_SEPARATOR: char = '.';

/// String-keyed container holding leaves and nested branches.
pub type Tree = serde_json::Map<String, Value>;

/// Returns the branch stored under `key` when it holds a nested tree.
///
/// # Examples
///
/// ```rust
/// use config_yml::{Tree, Value, branch};
///
/// let mut db = Tree::new();
/// db.insert("port".to_owned(), Value::from(5432));
/// let mut root = Tree::new();
/// root.insert("db".to_owned(), Value::Object(db));
/// root.insert("port".to_owned(), Value::from(25565));
///
/// assert!(branch(&root, "db").is_some());
/// assert!(branch(&root, "port").is_none());
/// ```
#[must_use]
pub fn branch<'a>(tree: &'a Tree, key: &str) -> Option<&'a Tree> {
    tree.get(key).and_then(Value::as_object)
}

/// Reads the value addressed by a dotted `path`.
///
/// Returns `None` when a segment is missing or an intermediate value is not a
/// tree.
#[must_use]
pub fn get_path<'a>(tree: &'a Tree, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(PATH_SEPARATOR);
    let first = tree.get(segments.next()?)?;
    segments.try_fold(first, |node, segment| node.as_object()?.get(segment))
}

/// Writes `value` at the dotted `path`, creating intermediate branches.
///
/// An intermediate value that is not a tree is replaced by an empty branch so
/// the write always lands.
///
/// # Examples
///
/// ```rust
/// use config_yml::{Tree, Value, get_path, set_path};
///
/// let mut tree = Tree::new();
/// set_path(&mut tree, "db.port", Value::from(5432));
/// assert_eq!(get_path(&tree, "db.port"), Some(&Value::from(5432)));
/// ```
pub fn set_path(tree: &mut Tree, path: &str, value: Value) {
    let Some((head, rest)) = path.split_once(PATH_SEPARATOR) else {
        tree.insert(path.to_owned(), value);
        return;
    };
    let entry = tree
        .entry(head.to_owned())
        .or_insert_with(|| Value::Object(Tree::new()));
    if !entry.is_object() {
        *entry = Value::Object(Tree::new());
    }
    if let Value::Object(child) = entry {
        set_path(child, rest, value);
    }
}

impl PersistHandle for Tree {
    fn set(&mut self, path: &str, value: Value) {
        set_path(self, path, value);
    }
}
