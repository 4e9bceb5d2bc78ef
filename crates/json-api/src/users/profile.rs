//! Profile Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workhub_app::auth::Caller;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    /// `ADMIN` or `EMPLOYEE`
    pub role: String,
}

impl From<&Caller> for ProfileResponse {
    fn from(caller: &Caller) -> Self {
        ProfileResponse {
            id: caller.uuid.into(),
            name: caller.name.clone(),
            email: caller.email.clone(),
            role: caller.role.to_string(),
        }
    }
}

/// Profile Handler
///
/// Returns the authenticated user.
#[endpoint(
    tags("users"),
    summary = "Current User Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let caller = depot.caller_or_401()?;

    Ok(Json(caller.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestApp, admin};

    use super::*;

    fn route() -> Router {
        Router::with_path("api/user/profile").get(handler)
    }

    #[tokio::test]
    async fn test_profile_returns_caller() -> TestResult {
        let caller = admin();

        let response: ProfileResponse = TestClient::get("http://example.com/api/user/profile")
            .send(&TestApp::default().service_as(caller.clone(), route()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.id, caller.uuid.into_uuid());
        assert_eq!(response.email, caller.email);
        assert_eq!(response.role, "ADMIN");

        Ok(())
    }

    #[tokio::test]
    async fn test_profile_without_caller_returns_401() {
        let res = TestClient::get("http://example.com/api/user/profile")
            .send(&TestApp::default().service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
