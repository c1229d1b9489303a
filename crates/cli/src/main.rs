//! TLS Sig CLI

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

mod cli;
mod config;
mod logging;

fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(init_error) = logging::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, stderr is the only channel left"
        )]
        {
            eprintln!("failed to initialise logging: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");

            ExitCode::FAILURE
        }
    }
}
