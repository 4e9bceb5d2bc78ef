//! Users Data

use crate::domain::users::records::{Role, UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}
