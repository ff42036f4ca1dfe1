use clap::{Parser, Subcommand};

mod db;
mod session;
mod timers;

#[derive(Debug, Parser)]
#[command(name = "countdown-app", about = "Countdown timers CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Timers(timers::TimersCommand),
    Session(session::SessionCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Timers(command) => timers::run(command).await,
            Commands::Session(command) => session::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
