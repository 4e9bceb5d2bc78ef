//! Mark Notification Read Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    notifications::{NotificationResponse, into_status_error},
    state::State,
};

/// Mark Notification Read Handler
///
/// Marks one of the authenticated user's notifications as read. Notifications
/// belonging to someone else are reported as not found.
#[endpoint(
    tags("notifications"),
    summary = "Mark Notification Read",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Notification marked read"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Notification not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    notification: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<NotificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let notification = state
        .app
        .notifications
        .mark_read(caller, notification.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(notification.into()))
}
