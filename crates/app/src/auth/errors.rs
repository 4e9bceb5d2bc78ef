//! Auth service errors.

use thiserror::Error;

use crate::{
    auth::{PasswordError, TokenError},
    database::RepositoryError,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email is already registered")]
    EmailTaken,

    #[error("invalid registration: {0}")]
    InvalidData(&'static str),

    /// Token verified but no identity matches its subject.
    #[error("unknown identity")]
    UnknownIdentity,

    #[error("token rejected")]
    Token(#[from] TokenError),

    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Repository(#[from] RepositoryError),
}
