//! Rental Admin CLI - Main Entry Point
//!
//! Resolves configuration, wires the authenticated client and runs one
//! command, printing the normalized JSON envelope to stdout.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::CommandError;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "Starting rental-admin v{}", env!("CARGO_PKG_VERSION"));

    match commands::run(cli).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(CommandError::Api(error)) => {
            eprintln!("{}", serde_json::to_string_pretty(error.body())?);
            Ok(ExitCode::FAILURE)
        }
        Err(other) => Err(other.into()),
    }
}
