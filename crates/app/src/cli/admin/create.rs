use clap::Args;
use jiff::SignedDuration;
use marketplace_app::auth::{PgAuthService, TokenIssuer};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Display name of the admin
    #[arg(long, default_value = "Admin User")]
    name: String,

    /// Login email
    #[arg(long, env = "ADMIN_EMAIL")]
    email: String,

    /// Login password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    // Only account management is used here, so no token is ever signed with this key.
    let tokens = TokenIssuer::new(String::new(), SignedDuration::ZERO);
    let service = PgAuthService::new(db, tokens);

    let (user, created) = service
        .create_admin(&args.name, &args.email, &args.password)
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    if created {
        println!("created admin account");
    } else {
        println!("reset existing account to admin");
    }

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);

    Ok(())
}
