use clap::Args;
use jiff::Timestamp;
use marketplace_app::domain::promotions::{PgPromotionsService, PromotionsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ExpireArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ExpireArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let expired = PgPromotionsService::new(db)
        .expire_promotions(Timestamp::now())
        .await
        .map_err(|error| format!("failed to expire promotions: {error}"))?;

    println!("expired {expired} promotions");

    Ok(())
}
