//! Auth Handlers

pub(crate) mod login;
pub(crate) mod register;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workhub_app::auth::Session;

/// Issued token and the identity it belongs to.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    /// User UUID
    pub id: Uuid,

    pub name: String,

    pub email: String,

    /// `ADMIN` or `EMPLOYEE`
    pub role: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        SessionResponse {
            token: session.token,
            id: session.caller.uuid.into(),
            name: session.caller.name,
            email: session.caller.email,
            role: session.caller.role.to_string(),
        }
    }
}
