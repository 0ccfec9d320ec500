mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use optsym_core::try_init_logging;
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let config = commands::load_config(cli.config.as_deref())?;
    let mut log_config = config.logging.clone();
    if let Some(level) = cli.log_level {
        log_config = log_config.with_level(level);
    }
    try_init_logging(&log_config);

    let codec = commands::resolve_codec(&cli, &config)?;
    debug!(format = %codec.format().name, layout = %codec.format().layout(), "resolved symbol format");

    let envelope = commands::run(&cli, &codec)?;
    output::render(&envelope, cli.output, cli.pretty)?;

    if cli.strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }

    Ok(())
}
