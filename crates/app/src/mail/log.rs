//! Mail transport that only logs.

use async_trait::async_trait;
use tracing::info;

use crate::mail::{Mail, MailTransport, TransportError};

/// Used when no mail relay is configured. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailTransport;

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, mail: Mail) -> Result<(), TransportError> {
        info!(to = %mail.to, subject = %mail.subject, "mail relay not configured; logging mail");

        Ok(())
    }
}
