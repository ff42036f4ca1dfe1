use clap::{Args, Subcommand};
use countdown_app::{
    database::{self, Db},
    domain::{shops::ShopDomain, timers::PgTimersService},
};
use jiff::Timestamp;

mod list;
mod stats;

#[derive(Debug, Args)]
pub(crate) struct TimersCommand {
    #[command(subcommand)]
    command: TimersSubcommand,
}

#[derive(Debug, Subcommand)]
enum TimersSubcommand {
    List(ShopArgs),
    Stats(ShopArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ShopArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Shop domain, e.g. `acme.myshopify.com`
    #[arg(long)]
    shop: ShopDomain,

    /// Point in time used to derive status; defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

impl ShopArgs {
    async fn service(&self) -> Result<PgTimersService, String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(PgTimersService::new(Db::new(pool)))
    }

    fn point_in_time(&self) -> Timestamp {
        self.at.unwrap_or_else(Timestamp::now)
    }
}

pub(crate) async fn run(command: TimersCommand) -> Result<(), String> {
    match command.command {
        TimersSubcommand::List(args) => list::run(args).await,
        TimersSubcommand::Stats(args) => stats::run(args).await,
    }
}
