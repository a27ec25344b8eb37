//! Trybuild fixture verifying structs relying on `Default` expand, whether
//! `Default` shares the derive list or sits in its own attribute.

use config_yml::{ConfigYml, Tree};

#[derive(ConfigYml, Default)]
struct SameList {
    pub db_port: u16,
}

#[derive(Default)]
#[derive(ConfigYml)]
struct Separate {
    pub motd: String,
}

struct Manual {
    pub level: u8,
}

impl Default for Manual {
    fn default() -> Self {
        Self { level: 3 }
    }
}

#[derive(ConfigYml)]
struct ManualDefault {
    pub log_level: u8,
}

impl Default for ManualDefault {
    fn default() -> Self {
        Self { log_level: Manual::default().level }
    }
}

fn main() {
    let map = Tree::new();
    let same = SameListSerializator::deserialize(&map).map(|value| value.db_port);
    let separate = SeparateSerializator::deserialize(&map).map(|value| value.motd);
    let manual = ManualDefaultSerializator::deserialize(&map).map(|value| value.log_level);
    assert_eq!(same.ok(), Some(0));
    assert_eq!(separate.ok().as_deref(), Some(""));
    assert_eq!(manual.ok(), Some(3));
}
