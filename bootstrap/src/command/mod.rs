pub mod register;
pub mod serve;

use crate::command::register::RegisterArgs;
use crate::command::serve::ServeArgs;
use clap::Subcommand;
use tracing::instrument;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to Discord and answer role selections
    #[command(name = "serve")]
    Serve(ServeArgs),
    /// Register the slash commands and exit
    #[command(name = "register")]
    Register(RegisterArgs),
}

impl Command {
    #[instrument(level = "trace", skip(self))]
    pub async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Serve(args) => serve::run(args).await,
            Command::Register(args) => register::run(args).await,
        }
    }
}
