//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Access token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in hours
    #[arg(long, env = "JWT_TTL_HOURS", default_value_t = 168)]
    pub jwt_ttl_hours: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(self.jwt_ttl_hours.max(1))
    }
}
