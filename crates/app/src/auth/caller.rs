//! Authenticated caller identity.

use crate::domain::users::records::{Role, UserRecord, UserUuid};

/// Identity resolved from a verified token, threaded explicitly into every
/// service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Caller {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<UserRecord> for Caller {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
