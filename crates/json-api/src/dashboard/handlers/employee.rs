//! Employee Dashboard Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use workhub_app::domain::dashboard::records::UserSummary;

use crate::{dashboard::into_status_error, extensions::*, state::State};

/// Counts of the caller's own workflows
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserSummaryResponse {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        UserSummaryResponse {
            total: summary.total,
            pending: summary.pending,
            approved: summary.approved,
            rejected: summary.rejected,
        }
    }
}

/// Employee Dashboard Handler
#[endpoint(
    tags("dashboard"),
    summary = "My Workflow Summary",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let summary = state
        .app
        .dashboard
        .user_summary(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestApp, employee};

    use super::*;

    #[tokio::test]
    async fn test_returns_callers_counts() -> TestResult {
        let mut app = TestApp::default();

        app.dashboard
            .expect_user_summary()
            .once()
            .return_once(|_| {
                Ok(UserSummary {
                    total: 3,
                    pending: 2,
                    approved: 1,
                    rejected: 0,
                })
            });

        let body: UserSummaryResponse =
            TestClient::get("http://example.com/api/dashboard/employee")
                .send(&app.service_as(
                    employee(),
                    Router::with_path("api/dashboard/employee").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.total, 3);
        assert_eq!(body.pending, 2);
        assert_eq!(body.approved, 1);
        assert_eq!(body.rejected, 0);

        Ok(())
    }
}
