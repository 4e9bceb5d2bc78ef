//! My Workflows Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    workflows::{WorkflowsResponse, into_status_error},
};

/// My Workflows Handler
///
/// Returns the workflows raised by the authenticated user, newest first.
#[endpoint(
    tags("workflows"),
    summary = "List My Workflows",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WorkflowsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let workflows = state
        .app
        .workflows
        .list_own(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(workflows.into()))
}
