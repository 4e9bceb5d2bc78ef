//! List Notifications Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    notifications::{NotificationsResponse, into_status_error},
    state::State,
};

/// List Notifications Handler
///
/// Returns the authenticated user's notifications, most recent first.
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<NotificationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let notifications = state
        .app
        .notifications
        .list_for_user(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(NotificationsResponse {
        notifications: notifications.into_iter().map(Into::into).collect(),
    }))
}
