//! Workflow Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Workflow UUID
pub type WorkflowUuid = TypedUuid<WorkflowRecord>;

/// Workflow Event UUID
pub type WorkflowEventUuid = TypedUuid<WorkflowEventRecord>;

/// Approval state. `Pending` is initial, the other two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowStatus {
    Pending,
    Approved,
    Rejected,
}

/// Decision an approver applies to a pending workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Approve,
    Reject,
}

impl WorkflowStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Status reached by applying `resolution`, or `None` when the transition
    /// is not allowed from this status.
    #[must_use]
    pub const fn transition(self, resolution: Resolution) -> Option<Self> {
        match (self, resolution) {
            (Self::Pending, Resolution::Approve) => Some(Self::Approved),
            (Self::Pending, Resolution::Reject) => Some(Self::Rejected),
            (Self::Approved | Self::Rejected, _) => None,
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown workflow status `{0}`")]
pub struct UnknownStatus(String);

impl FromStr for WorkflowStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// Workflow Record
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRecord {
    pub uuid: WorkflowUuid,
    pub title: String,
    pub description: String,
    pub status: WorkflowStatus,
    pub requester: UserUuid,
    pub approver: Option<UserUuid>,
    pub created_at: Timestamp,
    pub approved_at: Option<Timestamp>,
}

impl WorkflowRecord {
    /// A workflow has left `Pending` exactly when it carries an approver and a
    /// resolution time.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.status.is_terminal() == (self.approver.is_some() && self.approved_at.is_some())
    }
}

/// Label recorded on each event in a workflow's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    Created,
    Approved,
    Rejected,
}

impl WorkflowAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    #[must_use]
    pub const fn for_status(status: WorkflowStatus) -> Self {
        match status {
            WorkflowStatus::Pending => Self::Created,
            WorkflowStatus::Approved => Self::Approved,
            WorkflowStatus::Rejected => Self::Rejected,
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown workflow action `{0}`")]
pub struct UnknownAction(String);

impl FromStr for WorkflowAction {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CREATED" => Ok(Self::Created),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownAction(value.to_string())),
        }
    }
}

/// Workflow Event Record. Append-only; `sequence` orders events by insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowEventRecord {
    pub uuid: WorkflowEventUuid,
    pub sequence: i64,
    pub workflow: WorkflowUuid,
    pub status: WorkflowStatus,
    pub action: WorkflowAction,
    pub performed_by: String,
    pub created_at: Timestamp,
}

/// Workflow counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl StatusCounts {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.pending + self.approved + self.rejected
    }

    pub fn add(&mut self, status: WorkflowStatus, count: u64) {
        match status {
            WorkflowStatus::Pending => self.pending += count,
            WorkflowStatus::Approved => self.approved += count,
            WorkflowStatus::Rejected => self.rejected += count,
        }
    }
}
