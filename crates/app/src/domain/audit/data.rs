//! Audit Data

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::{audit::records::AuditEntryUuid, users::records::Role};

/// New Audit Entry Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub action: String,
    pub entity_type: String,
    pub entity: Uuid,
    pub performed_by: String,
    pub role: Role,
}

/// Audit entry ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntryDraft {
    pub uuid: AuditEntryUuid,
    pub action: String,
    pub entity_type: String,
    pub entity: Uuid,
    pub performed_by: String,
    pub role: Role,
    pub created_at: Timestamp,
}
