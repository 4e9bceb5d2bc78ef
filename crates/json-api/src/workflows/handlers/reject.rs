//! Reject Workflow Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    workflows::{WorkflowResponse, into_status_error},
};

/// Reject Workflow Handler
///
/// Moves a pending workflow to `REJECTED` and records the caller as approver.
#[endpoint(
    tags("admin"),
    summary = "Reject Workflow",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Workflow rejected"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrators only"),
        (status_code = StatusCode::NOT_FOUND, description = "Workflow not found"),
        (status_code = StatusCode::CONFLICT, description = "Workflow already resolved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    workflow: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<WorkflowResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let workflow = state
        .app
        .workflows
        .reject(caller, workflow.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(workflow.into()))
}
