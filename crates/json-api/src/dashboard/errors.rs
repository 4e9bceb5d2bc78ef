//! Dashboard Errors

use salvo::http::StatusError;
use tracing::error;

use workhub_app::domain::dashboard::DashboardServiceError;

pub(crate) fn into_status_error(error: DashboardServiceError) -> StatusError {
    match error {
        DashboardServiceError::Forbidden => {
            StatusError::forbidden().brief("Insufficient role for this resource")
        }
        DashboardServiceError::Repository(source) => {
            error!("failed to count workflows: {source}");

            StatusError::internal_server_error()
        }
    }
}
