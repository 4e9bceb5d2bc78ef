//! Audit service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Caller,
    clock::Clock,
    domain::audit::{
        AuditRepository, AuditServiceError,
        data::{AuditEntryDraft, NewAuditEntry},
        records::{AuditEntryRecord, AuditEntryUuid},
    },
};

#[derive(Clone)]
pub struct DefaultAuditService {
    repository: Arc<dyn AuditRepository>,
    clock: Arc<dyn Clock>,
}

impl DefaultAuditService {
    #[must_use]
    pub fn new(repository: Arc<dyn AuditRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl std::fmt::Debug for DefaultAuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAuditService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuditService for DefaultAuditService {
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntryRecord, AuditServiceError> {
        let recorded = self
            .repository
            .append(AuditEntryDraft {
                uuid: AuditEntryUuid::new(),
                action: entry.action,
                entity_type: entry.entity_type,
                entity: entry.entity,
                performed_by: entry.performed_by,
                role: entry.role,
                created_at: self.clock.now(),
            })
            .await?;

        Ok(recorded)
    }

    async fn list_all(&self, caller: &Caller) -> Result<Vec<AuditEntryRecord>, AuditServiceError> {
        if !caller.is_admin() {
            return Err(AuditServiceError::Forbidden);
        }

        Ok(self.repository.list_all().await?)
    }

    async fn list_by_entity_type(
        &self,
        caller: &Caller,
        entity_type: &str,
    ) -> Result<Vec<AuditEntryRecord>, AuditServiceError> {
        if !caller.is_admin() {
            return Err(AuditServiceError::Forbidden);
        }

        Ok(self.repository.list_by_entity_type(entity_type).await?)
    }
}

#[automock]
#[async_trait]
pub trait AuditService: Send + Sync {
    /// Append an entry stamped with the current time.
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntryRecord, AuditServiceError>;

    /// Every entry, oldest first. Administrators only.
    async fn list_all(&self, caller: &Caller) -> Result<Vec<AuditEntryRecord>, AuditServiceError>;

    /// Entries about one kind of entity, oldest first. Administrators only.
    async fn list_by_entity_type(
        &self,
        caller: &Caller,
        entity_type: &str,
    ) -> Result<Vec<AuditEntryRecord>, AuditServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{audit::records::WORKFLOW_ENTITY_TYPE, users::records::Role},
        test::{FixedClock, MemoryStore, admin, employee},
    };

    use super::*;

    fn service(store: &Arc<MemoryStore>) -> DefaultAuditService {
        DefaultAuditService::new(store.clone(), Arc::new(FixedClock::default()))
    }

    fn entry(action: &str, entity_type: &str) -> NewAuditEntry {
        NewAuditEntry {
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity: Uuid::now_v7(),
            performed_by: "root@example.com".to_string(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn entries_are_listed_in_insertion_order() -> TestResult {
        let store = Arc::new(MemoryStore::default());
        let audit = service(&store);

        audit.record(entry("CREATED", WORKFLOW_ENTITY_TYPE)).await?;
        audit.record(entry("SIGNED_IN", "User")).await?;
        audit.record(entry("APPROVED", WORKFLOW_ENTITY_TYPE)).await?;

        let all = audit.list_all(&admin()).await?;
        let actions: Vec<&str> = all.iter().map(|e| e.action.as_str()).collect();

        assert_eq!(actions, ["CREATED", "SIGNED_IN", "APPROVED"]);

        let workflow = audit
            .list_by_entity_type(&admin(), WORKFLOW_ENTITY_TYPE)
            .await?;
        let actions: Vec<&str> = workflow.iter().map(|e| e.action.as_str()).collect();

        assert_eq!(actions, ["CREATED", "APPROVED"]);

        Ok(())
    }

    #[tokio::test]
    async fn employees_cannot_read_the_audit_log() {
        let store = Arc::new(MemoryStore::default());

        let result = service(&store).list_all(&employee()).await;

        assert!(
            matches!(result, Err(AuditServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }
}
