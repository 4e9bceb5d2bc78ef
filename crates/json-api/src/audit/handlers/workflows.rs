//! Workflow Audit Handler

use std::sync::Arc;

use salvo::prelude::*;

use workhub_app::domain::audit::records::WORKFLOW_ENTITY_TYPE;

use crate::{
    audit::{AuditEntriesResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Workflow Audit Handler
///
/// Returns audit entries about workflows. Administrators only.
#[endpoint(
    tags("admin"),
    summary = "List Workflow Audit Entries",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AuditEntriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let entries = state
        .app
        .audit
        .list_by_entity_type(caller, WORKFLOW_ENTITY_TYPE)
        .await
        .map_err(into_status_error)?;

    Ok(Json(entries.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestApp, admin};

    use super::*;

    #[tokio::test]
    async fn test_filters_by_workflow_entity_type() -> TestResult {
        let mut app = TestApp::default();

        app.audit
            .expect_list_by_entity_type()
            .once()
            .withf(|_, entity_type| entity_type == WORKFLOW_ENTITY_TYPE)
            .return_once(|_, _| Ok(Vec::new()));

        app.audit.expect_list_all().never();

        let body: AuditEntriesResponse =
            TestClient::get("http://example.com/api/admin/audit/workflow")
                .send(&app.service_as(
                    admin(),
                    Router::with_path("api/admin/audit/workflow").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert!(body.entries.is_empty());

        Ok(())
    }
}
