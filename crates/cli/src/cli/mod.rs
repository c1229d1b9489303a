use clap::{Parser, Subcommand};

use crate::config::LoggingConfig;

mod inspect;
mod private_map_key;
mod user_sig;

#[derive(Debug, Parser)]
#[command(name = "tls-sig", about = "Issue UserSig and PrivateMapKey tokens", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Issue a UserSig
    UserSig(user_sig::UserSigArgs),

    /// Issue a PrivateMapKey scoped to one room
    PrivateMapKey(private_map_key::PrivateMapKeyArgs),

    /// Decode a token and print its contents
    Inspect(inspect::InspectArgs),
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        let output = match self.command {
            Commands::UserSig(args) => user_sig::execute(&args)?,
            Commands::PrivateMapKey(args) => private_map_key::execute(&args)?,
            Commands::Inspect(args) => inspect::execute(&args)?,
        };

        #[expect(clippy::print_stdout, reason = "command output is the token or its contents")]
        {
            println!("{output}");
        }

        Ok(())
    }
}
