use clap::{Args, Subcommand};

mod seed;

#[derive(Debug, Args)]
pub(crate) struct CategoriesCommand {
    #[command(subcommand)]
    command: CategoriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum CategoriesSubcommand {
    /// Insert the default categories that do not exist yet
    Seed(seed::SeedArgs),
}

pub(crate) async fn run(command: CategoriesCommand) -> Result<(), String> {
    match command.command {
        CategoriesSubcommand::Seed(args) => seed::run(args).await,
    }
}
