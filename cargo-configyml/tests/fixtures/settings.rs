//! Fixture scanned by the `cargo-configyml` integration tests.

use config_yml::ConfigYml;

#[derive(ConfigYml, Default)]
pub struct Server {
    pub port: u16,
    pub db_host: String,
    pub db_port: u16,
}

pub mod chat {
    use config_yml::ConfigYml;

    #[derive(ConfigYml)]
    pub struct Messages {
        pub motd: String,
        pub prefix_error: String,
    }

    impl Messages {
        pub fn new() -> Self {
            Self {
                motd: "Welcome".to_owned(),
                prefix_error: "[!]".to_owned(),
            }
        }
    }
}
