//! Audit Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::{RepositoryError, try_get_parsed},
    domain::audit::{
        data::AuditEntryDraft,
        records::{AuditEntryRecord, AuditEntryUuid},
    },
};

const APPEND_AUDIT_ENTRY_SQL: &str = include_str!("sql/append_audit_entry.sql");
const LIST_AUDIT_ENTRIES_SQL: &str = include_str!("sql/list_audit_entries.sql");
const LIST_AUDIT_ENTRIES_BY_ENTITY_TYPE_SQL: &str =
    include_str!("sql/list_audit_entries_by_entity_type.sql");

#[automock]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn append(&self, entry: AuditEntryDraft) -> Result<AuditEntryRecord, RepositoryError>;

    /// Every entry in insertion order.
    async fn list_all(&self) -> Result<Vec<AuditEntryRecord>, RepositoryError>;

    async fn list_by_entity_type(
        &self,
        entity_type: &str,
    ) -> Result<Vec<AuditEntryRecord>, RepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn append(&self, entry: AuditEntryDraft) -> Result<AuditEntryRecord, RepositoryError> {
        let appended = query_as::<Postgres, AuditEntryRecord>(APPEND_AUDIT_ENTRY_SQL)
            .bind(entry.uuid.into_uuid())
            .bind(entry.action)
            .bind(entry.entity_type)
            .bind(entry.entity)
            .bind(entry.performed_by)
            .bind(entry.role.as_str())
            .bind(SqlxTimestamp::from(entry.created_at))
            .fetch_one(&self.pool)
            .await?;

        Ok(appended)
    }

    async fn list_all(&self) -> Result<Vec<AuditEntryRecord>, RepositoryError> {
        let entries = query_as::<Postgres, AuditEntryRecord>(LIST_AUDIT_ENTRIES_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    async fn list_by_entity_type(
        &self,
        entity_type: &str,
    ) -> Result<Vec<AuditEntryRecord>, RepositoryError> {
        let entries = query_as::<Postgres, AuditEntryRecord>(LIST_AUDIT_ENTRIES_BY_ENTITY_TYPE_SQL)
            .bind(entity_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }
}

impl<'r> FromRow<'r, PgRow> for AuditEntryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AuditEntryUuid::from_uuid(row.try_get("uuid")?),
            sequence: row.try_get("sequence")?,
            action: row.try_get("action")?,
            entity_type: row.try_get("entity_type")?,
            entity: row.try_get("entity_uuid")?,
            performed_by: row.try_get("performed_by")?,
            role: try_get_parsed(row, "role")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
