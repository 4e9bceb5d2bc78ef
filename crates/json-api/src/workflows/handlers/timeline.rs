//! Workflow Timeline Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    workflows::{TimelineResponse, into_status_error},
};

/// Workflow Timeline Handler
///
/// Returns the status events of a workflow in the order they were recorded.
#[endpoint(
    tags("workflows"),
    summary = "Workflow Timeline",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    workflow: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TimelineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let events = state
        .app
        .workflows
        .timeline(caller, workflow.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(TimelineResponse {
        events: events.into_iter().map(Into::into).collect(),
    }))
}
