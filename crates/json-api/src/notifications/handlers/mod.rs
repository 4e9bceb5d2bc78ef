//! Notification Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workhub_app::domain::notifications::records::NotificationRecord;

pub(crate) mod index;
pub(crate) mod read;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    pub uuid: Uuid,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(notification: NotificationRecord) -> Self {
        NotificationResponse {
            uuid: notification.uuid.into(),
            message: notification.message,
            read: notification.read,
            created_at: notification.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsResponse {
    /// Most recent first
    pub notifications: Vec<NotificationResponse>,
}
