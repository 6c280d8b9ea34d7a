//! uodata command-line entry point.

mod cli;
mod config;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use uodata_locator::Resolver;

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Args::parse();
    let config = config::Config::load(args.config.as_deref())?;

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting uodata");

    let data_dir = config.data_dir(
        args.data_dir.clone(),
        std::env::var_os(config::DATA_DIR_ENV),
    );
    let resolver =
        Resolver::platform_default(data_dir, config.search_paths(), config.use_registry);
    let installation = resolver.into_installation();

    let mut stdout = std::io::stdout().lock();
    let ok = cli::run(&args.command, &installation, &mut stdout)?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
