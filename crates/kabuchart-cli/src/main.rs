mod cli;
mod commands;
mod error;
mod output;
mod telemetry;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

/// Exit code when a fetch failed and was reported in the envelope.
const FETCH_FAILURE_EXIT: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let envelope = commands::run(&cli).await?;
    output::render(&envelope, cli.format, cli.pretty)?;

    if !envelope.errors.is_empty() {
        return Ok(ExitCode::from(FETCH_FAILURE_EXIT));
    }

    Ok(ExitCode::SUCCESS)
}
