//! Audit Errors

use salvo::http::StatusError;
use tracing::error;

use workhub_app::domain::audit::AuditServiceError;

pub(crate) fn into_status_error(error: AuditServiceError) -> StatusError {
    match error {
        AuditServiceError::Forbidden => {
            StatusError::forbidden().brief("Insufficient role for this resource")
        }
        AuditServiceError::Repository(source) => {
            error!("failed to read audit log: {source}");

            StatusError::internal_server_error()
        }
    }
}
