//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    mail::MailConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod server;

/// Workhub JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "workhub-json", about = "Workhub JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Token signing settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Outbound mail settings.
    #[command(flatten)]
    pub mail: MailConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 5] = [
        "workhub-json",
        "--database-url",
        "postgres://localhost/workhub",
        "--jwt-secret",
        "not-a-real-secret",
    ];

    #[test]
    fn test_config_definition_is_consistent() {
        ServerConfig::command().debug_assert();
    }

    #[test]
    fn test_defaults_apply() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.auth.jwt_expiration_seconds, 86_400);
        assert_eq!(config.server.shutdown_grace().as_secs(), 30);
        assert!(config.mail.relay()?.is_none(), "mail relay is optional");
        assert_eq!(config.mail.mail_timeout_seconds, 10);

        Ok(())
    }

    #[test]
    fn test_mail_relay_requires_key_and_sender() -> TestResult {
        let config = ServerConfig::try_parse_from(
            REQUIRED
                .into_iter()
                .chain(["--mail-api-url", "https://relay.example.com/send"]),
        )?;

        assert!(
            config.mail.relay().is_err(),
            "relay url without key and sender must be rejected"
        );

        Ok(())
    }

    #[test]
    fn test_mail_relay_carries_timeout() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED.into_iter().chain([
            "--mail-api-url",
            "https://relay.example.com/send",
            "--mail-api-key",
            "relay-key",
            "--mail-from",
            "noreply@example.com",
            "--mail-timeout-seconds",
            "3",
        ]))?;

        let relay = config.mail.relay()?.ok_or("relay should be configured")?;

        assert_eq!(relay.timeout.as_secs(), 3);
        assert_eq!(relay.from, "noreply@example.com");

        Ok(())
    }
}
