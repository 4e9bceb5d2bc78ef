//! Workflow Errors

use salvo::http::StatusError;
use tracing::error;

use workhub_app::domain::workflows::WorkflowsServiceError;

pub(crate) fn into_status_error(error: WorkflowsServiceError) -> StatusError {
    match error {
        WorkflowsServiceError::NotFound => StatusError::not_found().brief("Workflow not found"),
        WorkflowsServiceError::InvalidTransition(status) => {
            StatusError::conflict().brief(format!("Workflow is already {status}"))
        }
        WorkflowsServiceError::Forbidden => {
            StatusError::forbidden().brief("Insufficient role for this resource")
        }
        WorkflowsServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        WorkflowsServiceError::Repository(source) => {
            error!("failed to access workflows: {source}");

            StatusError::internal_server_error()
        }
    }
}
