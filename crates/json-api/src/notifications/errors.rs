//! Notification Errors

use salvo::http::StatusError;
use tracing::error;

use workhub_app::domain::notifications::NotificationsServiceError;

pub(crate) fn into_status_error(error: NotificationsServiceError) -> StatusError {
    match error {
        NotificationsServiceError::NotFound => {
            StatusError::not_found().brief("Notification not found")
        }
        NotificationsServiceError::Repository(source) => {
            error!("failed to access notifications: {source}");

            StatusError::internal_server_error()
        }
    }
}
