//! Trybuild fixture verifying `#[config_yml(crate = "...")]` makes generated
//! code reference the runtime through the aliased name.

use config_yml as my_yml;
use my_yml::ConfigYml;

#[derive(ConfigYml, Default)]
#[config_yml(crate = "my_yml")]
struct Aliased {
    pub value: String,
    pub limit_count: u32,
}

fn main() {
    let aliased = Aliased {
        value: "hello".to_owned(),
        limit_count: 1,
    };
    let tree: my_yml::Tree = AliasedSerializator::serialize(&aliased).unwrap_or_default();
    let _: Result<Aliased, my_yml::CodecError> = AliasedSerializator::deserialize(&tree);
}
