//! Dashboard service errors.

use thiserror::Error;

use crate::database::RepositoryError;

#[derive(Debug, Error)]
pub enum DashboardServiceError {
    #[error("caller may not view this dashboard")]
    Forbidden,

    #[error("storage error")]
    Repository(#[from] RepositoryError),
}
