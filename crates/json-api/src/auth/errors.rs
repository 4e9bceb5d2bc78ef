//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use workhub_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::EmailTaken => StatusError::conflict().brief("Email already registered"),
        AuthServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        AuthServiceError::UnknownIdentity | AuthServiceError::Token(_) => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Repository(source) => {
            error!("failed to access users: {source}");

            StatusError::internal_server_error()
        }
    }
}
