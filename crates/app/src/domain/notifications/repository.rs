//! Notifications Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::RepositoryError,
    domain::{
        notifications::{
            data::NewNotification,
            records::{NotificationRecord, NotificationUuid},
        },
        users::records::UserUuid,
    },
};

const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const LIST_NOTIFICATIONS_FOR_USER_SQL: &str = include_str!("sql/list_notifications_for_user.sql");
const MARK_NOTIFICATION_READ_SQL: &str = include_str!("sql/mark_notification_read.sql");

#[automock]
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, RepositoryError>;

    /// Notifications addressed to `recipient`, most recent first.
    async fn list_for_user(
        &self,
        recipient: UserUuid,
    ) -> Result<Vec<NotificationRecord>, RepositoryError>;

    /// Flag a notification as read. `None` when it does not exist or belongs
    /// to someone else.
    async fn mark_read(
        &self,
        notification: NotificationUuid,
        recipient: UserUuid,
    ) -> Result<Option<NotificationRecord>, RepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgNotificationsRepository {
    pool: PgPool,
}

impl PgNotificationsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationsRepository for PgNotificationsRepository {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, RepositoryError> {
        let created = query_as::<Postgres, NotificationRecord>(CREATE_NOTIFICATION_SQL)
            .bind(notification.uuid.into_uuid())
            .bind(notification.recipient.into_uuid())
            .bind(notification.message)
            .bind(SqlxTimestamp::from(notification.created_at))
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn list_for_user(
        &self,
        recipient: UserUuid,
    ) -> Result<Vec<NotificationRecord>, RepositoryError> {
        let notifications = query_as::<Postgres, NotificationRecord>(LIST_NOTIFICATIONS_FOR_USER_SQL)
            .bind(recipient.into_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(notifications)
    }

    async fn mark_read(
        &self,
        notification: NotificationUuid,
        recipient: UserUuid,
    ) -> Result<Option<NotificationRecord>, RepositoryError> {
        let updated = query_as::<Postgres, NotificationRecord>(MARK_NOTIFICATION_READ_SQL)
            .bind(notification.into_uuid())
            .bind(recipient.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            sequence: row.try_get("sequence")?,
            recipient: UserUuid::from_uuid(row.try_get("recipient_uuid")?),
            message: row.try_get("message")?,
            read: row.try_get("read")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
