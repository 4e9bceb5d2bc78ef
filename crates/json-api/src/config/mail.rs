//! Mail Config

use std::time::Duration;

use clap::Args;
use thiserror::Error;
use workhub_app::mail::HttpMailConfig;
use zeroize::Zeroizing;

/// Mail relay settings. Without `MAIL_API_URL`, mail is only logged.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// HTTP mail relay endpoint
    #[arg(long, env = "MAIL_API_URL")]
    pub mail_api_url: Option<String>,

    /// Mail relay API key
    #[arg(long, env = "MAIL_API_KEY", hide_env_values = true)]
    pub mail_api_key: Option<String>,

    /// Sender address
    #[arg(long, env = "MAIL_FROM")]
    pub mail_from: Option<String>,

    /// Seconds to wait on the relay for one message
    #[arg(long, env = "MAIL_TIMEOUT_SECONDS", default_value_t = 10)]
    pub mail_timeout_seconds: u64,
}

#[derive(Debug, Error)]
pub enum MailConfigError {
    #[error("MAIL_API_URL is set but {0} is missing")]
    Missing(&'static str),
}

impl MailConfig {
    /// Relay settings, or `None` when no relay is configured.
    ///
    /// # Errors
    ///
    /// Returns an error when a relay URL is given without a key or sender.
    pub fn relay(&self) -> Result<Option<HttpMailConfig>, MailConfigError> {
        let Some(url) = &self.mail_api_url else {
            return Ok(None);
        };

        let api_key = self
            .mail_api_key
            .clone()
            .ok_or(MailConfigError::Missing("MAIL_API_KEY"))?;

        let from = self
            .mail_from
            .clone()
            .ok_or(MailConfigError::Missing("MAIL_FROM"))?;

        Ok(Some(HttpMailConfig {
            url: url.clone(),
            api_key: Zeroizing::new(api_key),
            from,
            timeout: Duration::from_secs(self.mail_timeout_seconds),
        }))
    }
}
