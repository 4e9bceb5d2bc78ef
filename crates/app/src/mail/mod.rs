//! Outbound email.

mod http;
mod log;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::workflows::records::WorkflowStatus;

pub use http::{HttpMailConfig, HttpMailTransport};
pub use log::LogMailTransport;

/// Subject line used for every workflow status email.
pub const STATUS_UPDATE_SUBJECT: &str = "Workflow Request Status Update";

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail relay rejected message: {0}")]
    Rejected(String),
}

#[automock]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: Mail) -> Result<(), TransportError>;
}

/// Email telling a requester their workflow reached `status`.
#[must_use]
pub fn status_update_mail(name: &str, email: &str, status: WorkflowStatus) -> Mail {
    Mail {
        to: email.to_string(),
        subject: STATUS_UPDATE_SUBJECT.to_string(),
        body: format!(
            "Hello {name},\n\nYour request has been {status}.\n\nThank you,\nWorkflowPro Team"
        ),
    }
}
