//! Audit service errors.

use thiserror::Error;

use crate::database::RepositoryError;

#[derive(Debug, Error)]
pub enum AuditServiceError {
    #[error("caller may not read the audit log")]
    Forbidden,

    #[error("storage error")]
    Repository(#[from] RepositoryError),
}
