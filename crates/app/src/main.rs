//! Reserva Application CLI

use std::process::ExitCode;

use clap::Parser;
use reserva_app::observability;
use tracing::error;

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init(cli.logging()) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "command failed");
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}
