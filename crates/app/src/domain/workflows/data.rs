//! Workflows Data

use jiff::Timestamp;

use crate::domain::{
    users::records::UserUuid,
    workflows::records::{
        WorkflowAction, WorkflowEventUuid, WorkflowStatus, WorkflowUuid,
    },
};

/// New Workflow Data. The requester is always the authenticated caller, so it
/// has no field here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkflow {
    pub title: String,
    pub description: String,
}

/// Pending workflow ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDraft {
    pub uuid: WorkflowUuid,
    pub title: String,
    pub description: String,
    pub requester: UserUuid,
    pub created_at: Timestamp,
}

/// Terminal state applied to a pending workflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkflowResolution {
    pub status: WorkflowStatus,
    pub approver: UserUuid,
    pub approved_at: Timestamp,
}

/// New Workflow Event Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkflowEvent {
    pub uuid: WorkflowEventUuid,
    pub workflow: WorkflowUuid,
    pub status: WorkflowStatus,
    pub action: WorkflowAction,
    pub performed_by: String,
    pub created_at: Timestamp,
}
