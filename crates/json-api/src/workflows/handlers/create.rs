//! Create Workflow Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use workhub_app::domain::workflows::data::NewWorkflow;

use crate::{
    extensions::*,
    state::State,
    workflows::{WorkflowResponse, into_status_error},
};

/// Create Workflow Request. Requester and status are always set by the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateWorkflowRequest {
    pub title: String,
    pub description: Option<String>,
}

impl From<CreateWorkflowRequest> for NewWorkflow {
    fn from(request: CreateWorkflowRequest) -> Self {
        NewWorkflow {
            title: request.title,
            description: request.description.unwrap_or_default(),
        }
    }
}

/// Create Workflow Handler
///
/// Raises a pending request for the authenticated user.
#[endpoint(
    tags("workflows"),
    summary = "Create Workflow",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Workflow created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateWorkflowRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WorkflowResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let workflow = state
        .app
        .workflows
        .create(caller, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(workflow.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use workhub_app::domain::workflows::{WorkflowsServiceError, records::WorkflowUuid};

    use crate::test_helpers::{TestApp, employee, make_workflow};

    use super::*;

    fn route() -> Router {
        Router::with_path("api/workflows").post(handler)
    }

    #[tokio::test]
    async fn test_create_returns_201_with_pending_workflow() -> TestResult {
        let mut app = TestApp::default();
        let caller = employee();
        let workflow = make_workflow(WorkflowUuid::new(), caller.uuid);
        let expected = workflow.uuid;

        app.workflows
            .expect_create()
            .once()
            .withf(|_, new| {
                *new == NewWorkflow {
                    title: "New laptop".to_string(),
                    description: "Mine is broken".to_string(),
                }
            })
            .return_once(move |_, _| Ok(workflow));

        let mut res = TestClient::post("http://example.com/api/workflows")
            .json(&json!({ "title": "New laptop", "description": "Mine is broken" }))
            .send(&app.service_as(caller, route()))
            .await;

        let body: WorkflowResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, expected.into_uuid());
        assert_eq!(body.status, "PENDING");
        assert_eq!(body.approver, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_ignores_client_supplied_requester_and_status() -> TestResult {
        let mut app = TestApp::default();
        let caller = employee();
        let caller_uuid = caller.uuid;
        let workflow = make_workflow(WorkflowUuid::new(), caller.uuid);

        app.workflows
            .expect_create()
            .once()
            .withf(move |who, new| who.uuid == caller_uuid && new.description.is_empty())
            .return_once(move |_, _| Ok(workflow));

        let mut res = TestClient::post("http://example.com/api/workflows")
            .json(&json!({
                "title": "New laptop",
                "user": "00000000-0000-0000-0000-000000000000",
                "status": "APPROVED",
            }))
            .send(&app.service_as(caller, route()))
            .await;

        let body: WorkflowResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.requester, caller_uuid.into_uuid());
        assert_eq!(body.status, "PENDING");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_blank_title_returns_400() {
        let mut app = TestApp::default();

        app.workflows
            .expect_create()
            .once()
            .return_once(|_, _| Err(WorkflowsServiceError::InvalidData("title must not be blank")));

        let res = TestClient::post("http://example.com/api/workflows")
            .json(&json!({ "title": "  " }))
            .send(&app.service_as(employee(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_without_caller_returns_401() {
        let mut app = TestApp::default();

        app.workflows.expect_create().never();

        let res = TestClient::post("http://example.com/api/workflows")
            .json(&json!({ "title": "New laptop" }))
            .send(&app.service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
