use clap::Parser;
use dirkeep::cli::{Cli, run_cli};
use dirkeep::output::OutputFormatter;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run_cli(&cli.command, cli.dir.as_deref(), cli.config.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Timestamped log lines on stderr, filtered by `RUST_LOG` (default: info).
fn init_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
