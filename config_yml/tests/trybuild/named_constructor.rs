//! Trybuild fixture verifying a struct without `Default` can name its own
//! zero-argument constructor.

use config_yml::{ConfigYml, Serializator, Tree};

#[derive(ConfigYml)]
#[config_yml(constructor = "fresh")]
struct Session {
    pub timeout_seconds: u64,
    #[config_yml(skip)]
    pub started: std::time::Instant,
}

impl Session {
    fn fresh() -> Self {
        Self {
            timeout_seconds: 30,
            started: std::time::Instant::now(),
        }
    }
}

fn main() {
    let mut session = Session::fresh();
    let _ = session.started;
    let map = Tree::new();
    let _ = <SessionSerializator as Serializator>::inject_to(&mut session, &map);
    let _ = SessionSerializator::deserialize(&map);
}
