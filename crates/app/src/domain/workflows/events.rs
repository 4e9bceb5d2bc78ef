//! Workflow Events Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::{RepositoryError, try_get_parsed},
    domain::workflows::{
        data::NewWorkflowEvent,
        records::{WorkflowEventRecord, WorkflowEventUuid, WorkflowUuid},
    },
};

const APPEND_WORKFLOW_EVENT_SQL: &str = include_str!("sql/append_workflow_event.sql");
const LIST_WORKFLOW_EVENTS_SQL: &str = include_str!("sql/list_workflow_events.sql");

#[automock]
#[async_trait]
pub trait WorkflowEventsRepository: Send + Sync {
    async fn append(&self, event: NewWorkflowEvent)
    -> Result<WorkflowEventRecord, RepositoryError>;

    /// Events for `workflow` in insertion order.
    async fn list_for_workflow(
        &self,
        workflow: WorkflowUuid,
    ) -> Result<Vec<WorkflowEventRecord>, RepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgWorkflowEventsRepository {
    pool: PgPool,
}

impl PgWorkflowEventsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowEventsRepository for PgWorkflowEventsRepository {
    async fn append(
        &self,
        event: NewWorkflowEvent,
    ) -> Result<WorkflowEventRecord, RepositoryError> {
        let appended = query_as::<Postgres, WorkflowEventRecord>(APPEND_WORKFLOW_EVENT_SQL)
            .bind(event.uuid.into_uuid())
            .bind(event.workflow.into_uuid())
            .bind(event.status.as_str())
            .bind(event.action.as_str())
            .bind(event.performed_by)
            .bind(SqlxTimestamp::from(event.created_at))
            .fetch_one(&self.pool)
            .await?;

        Ok(appended)
    }

    async fn list_for_workflow(
        &self,
        workflow: WorkflowUuid,
    ) -> Result<Vec<WorkflowEventRecord>, RepositoryError> {
        let events = query_as::<Postgres, WorkflowEventRecord>(LIST_WORKFLOW_EVENTS_SQL)
            .bind(workflow.into_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }
}

impl<'r> FromRow<'r, PgRow> for WorkflowEventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WorkflowEventUuid::from_uuid(row.try_get("uuid")?),
            sequence: row.try_get("sequence")?,
            workflow: WorkflowUuid::from_uuid(row.try_get("workflow_uuid")?),
            status: try_get_parsed(row, "status")?,
            action: try_get_parsed(row, "action")?,
            performed_by: row.try_get("performed_by")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
