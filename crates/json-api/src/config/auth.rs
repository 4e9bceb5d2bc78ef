//! Auth Config

use clap::Args;
use jiff::SignedDuration;
use workhub_app::auth::SigningKey;

/// Token signing settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HS256 signing secret for issued tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Token lifetime in seconds
    #[arg(long, env = "JWT_EXPIRATION_SECONDS", default_value_t = 86_400)]
    pub jwt_expiration_seconds: i64,
}

impl AuthConfig {
    /// Move the secret into a zeroizing key.
    pub fn signing_key(&mut self) -> SigningKey {
        SigningKey::new(std::mem::take(&mut self.jwt_secret))
    }

    #[must_use]
    pub fn token_lifetime(&self) -> SignedDuration {
        SignedDuration::from_secs(self.jwt_expiration_seconds)
    }
}
