//! Workflow Models

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workhub_app::domain::workflows::records::{WorkflowEventRecord, WorkflowRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WorkflowResponse {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,

    /// `PENDING`, `APPROVED` or `REJECTED`
    pub status: String,

    /// UUID of the user who raised the request
    pub requester: Uuid,

    /// UUID of the administrator who resolved the request
    pub approver: Option<Uuid>,

    pub created_at: String,

    /// When the request left `PENDING`
    pub approved_at: Option<String>,
}

impl From<WorkflowRecord> for WorkflowResponse {
    fn from(workflow: WorkflowRecord) -> Self {
        WorkflowResponse {
            uuid: workflow.uuid.into(),
            title: workflow.title,
            description: workflow.description,
            status: workflow.status.to_string(),
            requester: workflow.requester.into(),
            approver: workflow.approver.map(Into::into),
            created_at: workflow.created_at.to_string(),
            approved_at: workflow.approved_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WorkflowsResponse {
    pub workflows: Vec<WorkflowResponse>,
}

impl From<Vec<WorkflowRecord>> for WorkflowsResponse {
    fn from(workflows: Vec<WorkflowRecord>) -> Self {
        WorkflowsResponse {
            workflows: workflows.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WorkflowEventResponse {
    pub uuid: Uuid,

    /// Status the workflow had after this event
    pub status: String,

    /// `CREATED`, `APPROVED` or `REJECTED`
    pub action: String,

    /// Email of the acting user
    pub performed_by: String,

    pub created_at: String,
}

impl From<WorkflowEventRecord> for WorkflowEventResponse {
    fn from(event: WorkflowEventRecord) -> Self {
        WorkflowEventResponse {
            uuid: event.uuid.into(),
            status: event.status.to_string(),
            action: event.action.to_string(),
            performed_by: event.performed_by,
            created_at: event.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimelineResponse {
    /// Events in the order they were recorded
    pub events: Vec<WorkflowEventResponse>,
}
