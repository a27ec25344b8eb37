//! Command-line interface definitions for `cargo-configyml`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::Parser;

/// Name cargo passes as the first argument when run as `cargo configyml`.
const SUBCOMMAND: &str = "configyml";

/// Parsed CLI arguments for `cargo-configyml`.
#[derive(Debug, Parser)]
#[command(name = "cargo-configyml")]
#[command(about = "Generate ConfigYml serializators from annotated structs")]
#[command(version)]
pub struct Args {
    /// Source files or directories to scan for `#[derive(ConfigYml)]`.
    #[arg(value_name = "path", default_value = "src")]
    pub inputs: Vec<Utf8PathBuf>,
    /// Output directory for generated serializators.
    #[arg(long, value_name = "path", default_value = "target/configyml")]
    pub out_dir: Utf8PathBuf,
    /// Validate every candidate without writing any file.
    #[arg(long = "check")]
    pub is_check_only: bool,
}

impl Args {
    /// Parses the process arguments, accepting both `cargo-configyml ...`
    /// and `cargo configyml ...` invocations.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse_from(strip_subcommand(std::env::args_os()))
    }
}

/// Drops the subcommand name cargo inserts after the binary name.
#[must_use]
pub fn strip_subcommand<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut collected: Vec<OsString> = args.into_iter().collect();
    if collected.get(1).is_some_and(|arg| arg == SUBCOMMAND) {
        collected.remove(1);
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case::cargo(&["cargo-configyml", "configyml", "--check"], &["cargo-configyml", "--check"])]
    #[case::direct(&["cargo-configyml", "--check"], &["cargo-configyml", "--check"])]
    #[case::bare(&["cargo-configyml"], &["cargo-configyml"])]
    fn strips_cargo_subcommand(#[case] raw: &[&str], #[case] expected: &[&str]) {
        assert_eq!(strip_subcommand(os(raw)), os(expected));
    }

    #[rstest]
    fn defaults_scan_src_into_target() {
        let args = Args::parse_from(["cargo-configyml"]);
        assert_eq!(args.inputs, [Utf8PathBuf::from("src")]);
        assert_eq!(args.out_dir, "target/configyml");
        assert!(!args.is_check_only);
    }

    #[rstest]
    fn accepts_several_inputs() {
        let args = Args::parse_from([
            "cargo-configyml",
            "a.rs",
            "b",
            "--out-dir",
            "gen",
            "--check",
        ]);
        assert_eq!(args.inputs, [Utf8PathBuf::from("a.rs"), Utf8PathBuf::from("b")]);
        assert_eq!(args.out_dir, "gen");
        assert!(args.is_check_only);
    }
}
