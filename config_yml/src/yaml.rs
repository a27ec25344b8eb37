//! YAML-backed persistence handle.
//!
//! [`YamlConfiguration`] keeps a document as a [`Tree`] so generated codecs
//! can read it directly and write recovered defaults into it. Files are read
//! and written through `cap-std` directory handles.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;

use crate::codec::PersistHandle;
use crate::error::CodecError;
use crate::tree::{Tree, branch, get_path, set_path};

/// Label used for documents that did not come from a file.
const INLINE_LABEL: &str = "<inline>";

/// A YAML document held as a nested tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YamlConfiguration {
    root: Tree,
}

impl YamlConfiguration {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing tree.
    #[must_use]
    pub const fn from_tree(root: Tree) -> Self {
        Self { root }
    }

    /// Parses YAML text.
    ///
    /// Blank input yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Yaml`] when the text is not valid YAML and
    /// [`CodecError::NotAMapping`] when its root is not a mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use config_yml::{Value, YamlConfiguration};
    ///
    /// let yml = YamlConfiguration::from_yaml_str("db:\n  port: 5432\n")?;
    /// assert_eq!(yml.get("db.port"), Some(&Value::from(5432)));
    /// # Ok::<(), config_yml::CodecError>(())
    /// ```
    pub fn from_yaml_str(contents: &str) -> Result<Self, CodecError> {
        Self::parse(contents, INLINE_LABEL)
    }

    /// Reads and parses the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Io`] when the file cannot be read, otherwise the
    /// errors of [`YamlConfiguration::from_yaml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, CodecError> {
        let (dir, file_name) = open_parent(path)?;
        let contents = dir.read_to_string(file_name).map_err(|source| CodecError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&contents, path.as_str())
    }

    /// Serialises the document and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Yaml`] when emission fails or
    /// [`CodecError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Utf8Path) -> Result<(), CodecError> {
        let contents = self.to_yaml_string()?;
        let (dir, file_name) = open_parent(path)?;
        dir.write(file_name, contents).map_err(|source| CodecError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Emits the document as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Yaml`] when emission fails.
    pub fn to_yaml_string(&self) -> Result<String, CodecError> {
        serde_yaml::to_string(&self.root).map_err(|source| CodecError::Yaml {
            path: INLINE_LABEL.to_owned(),
            source,
        })
    }

    /// Returns the value at a dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.root, path)
    }

    /// Returns the nested section at a dotted path.
    #[must_use]
    pub fn section(&self, path: &str) -> Option<&Tree> {
        match path.rsplit_once(crate::PATH_SEPARATOR) {
            Some((parent, key)) => self
                .get(parent)
                .and_then(Value::as_object)
                .and_then(|tree| branch(tree, key)),
            None => branch(&self.root, path),
        }
    }

    /// Returns the whole document.
    #[must_use]
    pub const fn values(&self) -> &Tree {
        &self.root
    }

    /// Consumes the handle, returning the document.
    #[must_use]
    pub fn into_tree(self) -> Tree {
        self.root
    }

    fn parse(contents: &str, label: &str) -> Result<Self, CodecError> {
        if contents.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_yaml::from_str(contents).map_err(|source| CodecError::Yaml {
            path: label.to_owned(),
            source,
        })?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            _ => Err(CodecError::NotAMapping {
                path: label.to_owned(),
            }),
        }
    }
}

impl PersistHandle for YamlConfiguration {
    fn set(&mut self, path: &str, value: Value) {
        set_path(&mut self.root, path, value);
    }
}

fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), CodecError> {
    let io_error = |source| CodecError::Io {
        path: path.to_string(),
        source,
    };
    let file_name = path.file_name().ok_or_else(|| {
        io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    Ok((dir, file_name))
}
