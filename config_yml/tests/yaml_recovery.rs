//! Self-healing of YAML documents through a generated serializator.
//!
//! A stored document with a malformed value is injected with defaults; the
//! recovered default must land both in the struct and in the saved file.

#![cfg(feature = "yaml")]

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use config_yml::{ConfigYml, Value, YamlConfiguration};
use rstest::rstest;

/// Server settings persisted as YAML.
#[derive(ConfigYml, Debug, Default, PartialEq)]
pub struct Server {
    /// Listening port.
    pub port: u16,
    /// Database host, stored at `db.host`.
    pub db_host: String,
    /// Database port, stored at `db.port`.
    pub db_port: u16,
}

const STORED: &str = "\
port: 25565
db:
  host: local
  port: not-a-number
";

const DEFAULTS: &str = "\
port: 25565
db:
  host: localhost
  port: 5432
";

#[rstest]
fn corrected_default_is_saved_to_disk() -> Result<()> {
    let tempdir = tempfile::tempdir()?;
    let root = Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("non UTF-8 temp dir {}", path.display()))?;
    let path = root.join("server.yml");
    std::fs::write(&path, STORED)?;

    let mut stored = YamlConfiguration::load(&path)?;
    let defaults = YamlConfiguration::from_yaml_str(DEFAULTS)?;
    let primary = stored.values().clone();
    let mut server = Server::default();

    ServerSerializator::inject_to_with_defaults(
        &mut server,
        &primary,
        Some(defaults.values()),
        Some(&mut stored),
    )?;
    stored.save(&path)?;

    assert_eq!(
        server,
        Server {
            port: 25565,
            db_host: "local".to_owned(),
            db_port: 5432,
        }
    );
    let reloaded = YamlConfiguration::load(&path)?;
    assert_eq!(reloaded.get("db.port"), Some(&Value::from(5432)));
    assert_eq!(reloaded.get("db.host"), Some(&Value::from("local")));
    Ok(())
}

#[rstest]
fn serialized_tree_round_trips_through_yaml() -> Result<()> {
    let server = Server {
        port: 8080,
        db_host: "db&cache".to_owned(),
        db_port: 6543,
    };
    let yml = YamlConfiguration::from_tree(ServerSerializator::serialize(&server)?);
    let text = yml.to_yaml_string()?;
    assert!(text.contains("db:"));

    let parsed = YamlConfiguration::from_yaml_str(&text)?;
    let section = parsed.section("db").context("db section")?;
    assert_eq!(section.get("port"), Some(&Value::from(6543)));

    let restored = ServerSerializator::deserialize(parsed.values())?;
    assert_eq!(restored.port, 8080);
    assert_eq!(restored.db_host, "db§cache");
    Ok(())
}
