use std::{path::PathBuf, sync::Arc};

use clap::Args;
use marketplace_app::{
    domain::categories::{CategoriesService, PgCategoriesService},
    uploads::LocalImageStore,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Directory holding uploaded images
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    uploads_dir: PathBuf,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let db = args.database.connect().await?;
    let service = PgCategoriesService::new(db, Arc::new(LocalImageStore::new(args.uploads_dir)));

    let inserted = service
        .seed_defaults()
        .await
        .map_err(|error| format!("failed to seed categories: {error}"))?;

    println!("inserted {inserted} categories");

    Ok(())
}
