//! Den command line entry point.

use std::process::ExitCode;

use clap::Parser;
use den::{
    DenError,
    cli::{CliService, GlobalArgs, formatting::format_error},
    context::Context,
    logging::{self, LogSettings},
};
use tracing::debug;

fn main() -> ExitCode {
    let args = GlobalArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", format_error("Error:"));
            ExitCode::from(e.exit_code())
        }
    }
}

/// Loads configuration, sets up logging and runs the requested command.
///
/// # Errors
/// Returns `DenError` for configuration, logging or command failures.
fn run(args: GlobalArgs) -> Result<(), DenError> {
    let mut context = Context::from_env()?;

    let settings = LogSettings::resolve(args.verbose, args.debug, context.config()?);
    logging::init(&settings).map_err(|e| DenError::Logging(e.to_string()))?;
    context.set_log_settings(settings);

    if settings.debug {
        debug!(?settings, "Running in debug mode");
    }

    let output = CliService::new().execute(&mut context, &args.command)?;
    if !output.trim().is_empty() {
        context.reporter().echo(output.trim_end());
    }

    Ok(())
}
