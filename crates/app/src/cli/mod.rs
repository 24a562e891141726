use clap::{Args, Parser, Subcommand};
use marketplace_app::database::{self, DEFAULT_MAX_CONNECTIONS, Db};

mod admin;
mod categories;
mod db;
mod promotions;

#[derive(Debug, Parser)]
#[command(name = "marketplace-app", about = "Marketplace CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Admin(admin::AdminCommand),
    Categories(categories::CategoriesCommand),
    Promotions(promotions::PromotionsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Admin(command) => admin::run(command).await,
            Commands::Categories(command) => categories::run(command).await,
            Commands::Promotions(command) => promotions::run(command).await,
        }
    }
}

/// Connection flags shared by every command that touches the database.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        database::connect(&self.database_url, DEFAULT_MAX_CONNECTIONS)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
