//! Notifications service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Caller,
    clock::Clock,
    domain::{
        notifications::{
            NotificationsRepository, NotificationsServiceError,
            data::NewNotification,
            records::{NotificationRecord, NotificationUuid},
        },
        users::records::UserUuid,
    },
};

#[derive(Clone)]
pub struct DefaultNotificationsService {
    repository: Arc<dyn NotificationsRepository>,
    clock: Arc<dyn Clock>,
}

impl DefaultNotificationsService {
    #[must_use]
    pub fn new(repository: Arc<dyn NotificationsRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl std::fmt::Debug for DefaultNotificationsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultNotificationsService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl NotificationsService for DefaultNotificationsService {
    async fn notify(
        &self,
        recipient: UserUuid,
        message: String,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let created = self
            .repository
            .create(NewNotification {
                uuid: NotificationUuid::new(),
                recipient,
                message,
                created_at: self.clock.now(),
            })
            .await?;

        Ok(created)
    }

    async fn list_for_user(
        &self,
        caller: &Caller,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        Ok(self.repository.list_for_user(caller.uuid).await?)
    }

    async fn mark_read(
        &self,
        caller: &Caller,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        self.repository
            .mark_read(notification, caller.uuid)
            .await?
            .ok_or(NotificationsServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Create an unread notification for `recipient`.
    async fn notify(
        &self,
        recipient: UserUuid,
        message: String,
    ) -> Result<NotificationRecord, NotificationsServiceError>;

    /// The caller's notifications, most recent first.
    async fn list_for_user(
        &self,
        caller: &Caller,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    /// Mark one of the caller's notifications as read.
    async fn mark_read(
        &self,
        caller: &Caller,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError>;
}
