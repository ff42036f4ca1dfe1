use clap::{Args, Subcommand};

mod token;

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    Token(token::SessionTokenArgs),
}

pub(crate) async fn run(command: SessionCommand) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Token(args) => token::run(&args),
    }
}
