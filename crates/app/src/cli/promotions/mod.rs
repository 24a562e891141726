use clap::{Args, Subcommand};

mod expire;

#[derive(Debug, Args)]
pub(crate) struct PromotionsCommand {
    #[command(subcommand)]
    command: PromotionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionsSubcommand {
    /// Mark overdue promotions expired and clear their product flags
    Expire(expire::ExpireArgs),
}

pub(crate) async fn run(command: PromotionsCommand) -> Result<(), String> {
    match command.command {
        PromotionsSubcommand::Expire(args) => expire::run(args).await,
    }
}
