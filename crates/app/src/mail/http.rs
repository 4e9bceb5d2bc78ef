//! HTTP mail relay client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use zeroize::Zeroizing;

use crate::mail::{Mail, MailTransport, TransportError};

/// Configuration for an HTTP mail relay.
#[derive(Clone)]
pub struct HttpMailConfig {
    /// Endpoint accepting JSON messages, e.g. `"https://relay.example.com/v1/send"`.
    pub url: String,

    /// Bearer API key for the relay.
    pub api_key: Zeroizing<String>,

    /// Sender address.
    pub from: String,

    /// Upper bound on one send, connect included.
    pub timeout: Duration,
}

impl fmt::Debug for HttpMailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMailConfig")
            .field("url", &self.url)
            .field("api_key", &"**redacted**")
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Sends mail as a JSON POST to a relay.
#[derive(Debug, Clone)]
pub struct HttpMailTransport {
    config: HttpMailConfig,
    http: Client,
}

impl HttpMailTransport {
    /// Build a transport whose requests give up after `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: HttpMailConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, http })
    }
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn send(&self, mail: Mail) -> Result<(), TransportError> {
        let body = RelayMessage {
            from: &self.config.from,
            to: &mail.to,
            subject: &mail.subject,
            text: &mail.body,
        };

        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(self.config.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(TransportError::Rejected(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}
