//! Fixture with classes the generator must reject.

use config_yml::ConfigYml;

#[derive(ConfigYml, Default)]
pub struct Limits {
    pub max: u32,
    pub max_burst: u32,
}

#[derive(ConfigYml, Default)]
pub struct Valid {
    pub name: String,
}
