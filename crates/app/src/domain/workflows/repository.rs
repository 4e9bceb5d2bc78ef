//! Workflows Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{RepositoryError, try_get_parsed},
    domain::{
        users::records::UserUuid,
        workflows::{
            data::{WorkflowDraft, WorkflowResolution},
            records::{StatusCounts, WorkflowRecord, WorkflowStatus, WorkflowUuid},
        },
    },
};

const CREATE_WORKFLOW_SQL: &str = include_str!("sql/create_workflow.sql");
const FIND_WORKFLOW_SQL: &str = include_str!("sql/find_workflow.sql");
const RESOLVE_PENDING_WORKFLOW_SQL: &str = include_str!("sql/resolve_pending_workflow.sql");
const LIST_WORKFLOWS_BY_REQUESTER_SQL: &str = include_str!("sql/list_workflows_by_requester.sql");
const LIST_WORKFLOWS_BY_STATUS_SQL: &str = include_str!("sql/list_workflows_by_status.sql");
const COUNT_WORKFLOWS_BY_STATUS_SQL: &str = include_str!("sql/count_workflows_by_status.sql");

#[automock]
#[async_trait]
pub trait WorkflowsRepository: Send + Sync {
    async fn find_by_uuid(
        &self,
        workflow: WorkflowUuid,
    ) -> Result<Option<WorkflowRecord>, RepositoryError>;

    /// Persist a new workflow in `Pending`.
    async fn create_workflow(&self, draft: WorkflowDraft)
    -> Result<WorkflowRecord, RepositoryError>;

    /// Atomically apply `resolution` if, and only if, the workflow is still
    /// pending. Returns `None` when no pending row matched.
    async fn resolve_pending(
        &self,
        workflow: WorkflowUuid,
        resolution: WorkflowResolution,
    ) -> Result<Option<WorkflowRecord>, RepositoryError>;

    /// Workflows raised by `requester`, newest first.
    async fn list_by_requester(
        &self,
        requester: UserUuid,
    ) -> Result<Vec<WorkflowRecord>, RepositoryError>;

    /// Workflows currently in `status`, newest first.
    async fn list_by_status(
        &self,
        status: WorkflowStatus,
    ) -> Result<Vec<WorkflowRecord>, RepositoryError>;

    /// Counts per status, across every requester when `requester` is `None`.
    async fn status_counts(
        &self,
        requester: Option<UserUuid>,
    ) -> Result<StatusCounts, RepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgWorkflowsRepository {
    pool: PgPool,
}

impl PgWorkflowsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowsRepository for PgWorkflowsRepository {
    async fn find_by_uuid(
        &self,
        workflow: WorkflowUuid,
    ) -> Result<Option<WorkflowRecord>, RepositoryError> {
        let workflow = query_as::<Postgres, WorkflowRecord>(FIND_WORKFLOW_SQL)
            .bind(workflow.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(workflow)
    }

    async fn create_workflow(
        &self,
        draft: WorkflowDraft,
    ) -> Result<WorkflowRecord, RepositoryError> {
        let created = query_as::<Postgres, WorkflowRecord>(CREATE_WORKFLOW_SQL)
            .bind(draft.uuid.into_uuid())
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.requester.into_uuid())
            .bind(SqlxTimestamp::from(draft.created_at))
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn resolve_pending(
        &self,
        workflow: WorkflowUuid,
        resolution: WorkflowResolution,
    ) -> Result<Option<WorkflowRecord>, RepositoryError> {
        let resolved = query_as::<Postgres, WorkflowRecord>(RESOLVE_PENDING_WORKFLOW_SQL)
            .bind(workflow.into_uuid())
            .bind(resolution.status.as_str())
            .bind(resolution.approver.into_uuid())
            .bind(SqlxTimestamp::from(resolution.approved_at))
            .fetch_optional(&self.pool)
            .await?;

        Ok(resolved)
    }

    async fn list_by_requester(
        &self,
        requester: UserUuid,
    ) -> Result<Vec<WorkflowRecord>, RepositoryError> {
        let workflows = query_as::<Postgres, WorkflowRecord>(LIST_WORKFLOWS_BY_REQUESTER_SQL)
            .bind(requester.into_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(workflows)
    }

    async fn list_by_status(
        &self,
        status: WorkflowStatus,
    ) -> Result<Vec<WorkflowRecord>, RepositoryError> {
        let workflows = query_as::<Postgres, WorkflowRecord>(LIST_WORKFLOWS_BY_STATUS_SQL)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(workflows)
    }

    async fn status_counts(
        &self,
        requester: Option<UserUuid>,
    ) -> Result<StatusCounts, RepositoryError> {
        let rows = sqlx::query(COUNT_WORKFLOWS_BY_STATUS_SQL)
            .bind(requester.map(UserUuid::into_uuid))
            .fetch_all(&self.pool)
            .await?;

        let mut counts = StatusCounts::default();

        for row in &rows {
            let status: WorkflowStatus = try_get_parsed(row, "status")?;
            let count = u64::try_from(row.try_get::<i64, _>("count")?)
                .map_err(|_| RepositoryError::InvalidData)?;

            counts.add(status, count);
        }

        Ok(counts)
    }
}

impl<'r> FromRow<'r, PgRow> for WorkflowRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WorkflowUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            status: try_get_parsed(row, "status")?,
            requester: UserUuid::from_uuid(row.try_get("requester_uuid")?),
            approver: row
                .try_get::<Option<Uuid>, _>("approver_uuid")?
                .map(UserUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            approved_at: row
                .try_get::<Option<SqlxTimestamp>, _>("approved_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
