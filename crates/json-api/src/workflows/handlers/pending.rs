//! Pending Workflows Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    workflows::{WorkflowsResponse, into_status_error},
};

/// Pending Workflows Handler
///
/// Returns every workflow awaiting a decision. Administrators only.
#[endpoint(
    tags("admin"),
    summary = "List Pending Workflows",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WorkflowsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let workflows = state
        .app
        .workflows
        .list_pending(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(workflows.into()))
}
