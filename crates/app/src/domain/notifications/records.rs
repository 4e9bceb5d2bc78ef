//! Notification Records

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

/// Notification Record. Only the `read` flag changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub sequence: i64,
    pub recipient: UserUuid,
    pub message: String,
    pub read: bool,
    pub created_at: Timestamp,
}
