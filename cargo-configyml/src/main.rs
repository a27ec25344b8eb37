//! CLI entrypoint for `cargo-configyml`.

use cargo_configyml::cli::Args;
use cargo_configyml::error::CliError;
use config_yml_codegen::TracingDiagnostics;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::from_env();
    let report = cargo_configyml::run(&args, &mut TracingDiagnostics)?;
    tracing::info!(
        generated = report.generated.len(),
        out_dir = %args.out_dir,
        check = args.is_check_only,
        "done"
    );
    Ok(())
}
