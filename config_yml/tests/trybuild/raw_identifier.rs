//! Trybuild fixture verifying raw identifiers are stored under their bare
//! names.

use config_yml::ConfigYml;

/// Item whose field names are keywords.
#[derive(ConfigYml, Default)]
pub struct Entity {
    /// Kind of entity.
    pub r#type: String,
    /// Whether the entity matched.
    pub r#match: bool,
}

fn main() {
    let entity = Entity::default();
    let Ok(tree) = EntitySerializator::serialize(&entity) else {
        return;
    };
    assert!(tree.contains_key("type"));
    assert!(tree.contains_key("match"));
}
