//! Admin Dashboard Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use workhub_app::domain::dashboard::records::OrganizationSummary;

use crate::{dashboard::into_status_error, extensions::*, state::State};

/// Counts across every requester
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationSummaryResponse {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl From<OrganizationSummary> for OrganizationSummaryResponse {
    fn from(summary: OrganizationSummary) -> Self {
        OrganizationSummaryResponse {
            pending: summary.pending,
            approved: summary.approved,
            rejected: summary.rejected,
        }
    }
}

/// Admin Dashboard Handler
#[endpoint(
    tags("dashboard"),
    summary = "Organization Workflow Summary",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<OrganizationSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let summary = state
        .app
        .dashboard
        .organization_summary(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
