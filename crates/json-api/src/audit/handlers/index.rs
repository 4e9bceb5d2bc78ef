//! Audit Log Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    audit::{AuditEntriesResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Audit Log Handler
///
/// Returns every audit entry. Administrators only.
#[endpoint(
    tags("admin"),
    summary = "List Audit Log",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AuditEntriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let entries = state
        .app
        .audit
        .list_all(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(entries.into()))
}
