use clap::{Parser, Subcommand};
use reserva_app::config::LoggingConfig;

mod submit;

#[derive(Debug, Parser)]
#[command(name = "reserva-app", about = "Reserva CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Submit(submit::SubmitArgs),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Submit(args) => submit::run(args).await,
        }
    }
}
