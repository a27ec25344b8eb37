//! Runtime support for codecs generated by `#[derive(ConfigYml)]`.
//!
//! The derive turns a struct whose field names follow the underscore path
//! convention (`db_port` lives at `db.port`) into a companion
//! `<Struct>Serializator` type. The generated code only relies on the items
//! exported here: the [`Tree`] container, the [`codec`] helpers used to cast,
//! sanitise and report values, the [`PersistHandle`] trait that receives
//! corrected defaults, and the [`CodecError`] type.
//!
//! ```rust
//! use config_yml::{ConfigYml, Tree};
//!
//! #[derive(ConfigYml, Default)]
//! pub struct Server {
//!     pub port: u16,
//!     pub db_host: String,
//!     pub db_port: u16,
//! }
//!
//! # fn main() -> Result<(), config_yml::CodecError> {
//! let server = Server { port: 25565, db_host: "local".into(), db_port: 5432 };
//! let tree: Tree = ServerSerializator::serialize(&server)?;
//! assert_eq!(
//!     config_yml::get_path(&tree, "db.port"),
//!     Some(&config_yml::Value::from(5432))
//! );
//!
//! let restored = ServerSerializator::deserialize(&tree)?;
//! assert_eq!(restored.db_host, "local");
//! # Ok(())
//! # }
//! ```

pub use config_yml_macros::ConfigYml;

pub mod codec;
mod error;
mod tree;
#[cfg(feature = "yaml")]
mod yaml;

pub use codec::{PersistHandle, Serializator};
pub use error::{CodecError, CodecResult};
pub use serde_json::Value;
pub use tree::{PATH_SEPARATOR, Tree, branch, get_path, set_path};
#[cfg(feature = "yaml")]
pub use yaml::YamlConfiguration;
