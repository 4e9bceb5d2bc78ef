//! Audit Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workhub_app::domain::audit::records::AuditEntryRecord;

pub(crate) mod index;
pub(crate) mod workflows;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuditEntryResponse {
    pub uuid: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity: Uuid,

    /// Email of the acting user
    pub performed_by: String,

    /// Role the actor held at the time
    pub role: String,

    pub created_at: String,
}

impl From<AuditEntryRecord> for AuditEntryResponse {
    fn from(entry: AuditEntryRecord) -> Self {
        AuditEntryResponse {
            uuid: entry.uuid.into(),
            action: entry.action,
            entity_type: entry.entity_type,
            entity: entry.entity,
            performed_by: entry.performed_by,
            role: entry.role.to_string(),
            created_at: entry.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuditEntriesResponse {
    /// Entries in the order they were recorded
    pub entries: Vec<AuditEntryResponse>,
}

impl From<Vec<AuditEntryRecord>> for AuditEntriesResponse {
    fn from(entries: Vec<AuditEntryRecord>) -> Self {
        AuditEntriesResponse {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}
