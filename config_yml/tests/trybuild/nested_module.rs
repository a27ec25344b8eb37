//! Trybuild fixture verifying the codec inherits the struct's visibility and
//! is usable from outside its module.

mod settings {
    use config_yml::ConfigYml;

    #[derive(ConfigYml, Default)]
    pub(crate) struct Chat {
        pub(crate) motd: String,
        pub(crate) prefix_error: String,
        secret: u8,
    }

    impl Chat {
        pub(crate) const fn secret(&self) -> u8 {
            self.secret
        }
    }
}

fn main() {
    let chat = settings::Chat::default();
    let _ = chat.secret();
    let tree = settings::ChatSerializator::serialize(&chat).unwrap_or_default();
    let mut defaults = config_yml::Tree::new();
    let _ = settings::ChatSerializator::inject_to_with_defaults(
        &mut settings::Chat::default(),
        &tree,
        Some(&tree),
        Some(&mut defaults),
    );
    let _ = (&chat.motd, &chat.prefix_error);
}
