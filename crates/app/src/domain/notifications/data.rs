//! Notifications Data

use jiff::Timestamp;

use crate::domain::{notifications::records::NotificationUuid, users::records::UserUuid};

/// Unread notification ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub uuid: NotificationUuid,
    pub recipient: UserUuid,
    pub message: String,
    pub created_at: Timestamp,
}
