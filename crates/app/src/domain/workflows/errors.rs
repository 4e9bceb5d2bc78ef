//! Workflows service errors.

use thiserror::Error;

use crate::{database::RepositoryError, domain::workflows::records::WorkflowStatus};

#[derive(Debug, Error)]
pub enum WorkflowsServiceError {
    #[error("workflow not found")]
    NotFound,

    /// The workflow already left `Pending`; carries the status it is in.
    #[error("workflow is already {0}")]
    InvalidTransition(WorkflowStatus),

    #[error("caller may not perform this operation")]
    Forbidden,

    #[error("invalid workflow: {0}")]
    InvalidData(&'static str),

    #[error("storage error")]
    Repository(#[from] RepositoryError),
}
