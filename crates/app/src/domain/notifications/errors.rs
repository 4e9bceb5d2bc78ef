//! Notifications service errors.

use thiserror::Error;

use crate::database::RepositoryError;

#[derive(Debug, Error)]
pub enum NotificationsServiceError {
    #[error("notification not found")]
    NotFound,

    #[error("storage error")]
    Repository(#[from] RepositoryError),
}
