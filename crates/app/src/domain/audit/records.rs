//! Audit Records

use jiff::Timestamp;
use uuid::Uuid;

use crate::{domain::users::records::Role, uuids::TypedUuid};

/// Audit Entry UUID
pub type AuditEntryUuid = TypedUuid<AuditEntryRecord>;

/// Entity type recorded for workflow audit entries.
pub const WORKFLOW_ENTITY_TYPE: &str = "Workflow";

/// Audit Entry Record. Append-only; `sequence` orders entries by insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntryRecord {
    pub uuid: AuditEntryUuid,
    pub sequence: i64,
    pub action: String,
    pub entity_type: String,
    pub entity: Uuid,
    pub performed_by: String,
    /// Role of the actor when the action happened.
    pub role: Role,
    pub created_at: Timestamp,
}
