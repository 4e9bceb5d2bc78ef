//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use workhub_app::auth::Credentials;

use crate::{
    auth::{SessionResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Login Handler
///
/// Exchanges credentials for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use workhub_app::{
        auth::{AuthServiceError, Session},
        database::RepositoryError,
    };

    use crate::test_helpers::{TestApp, admin};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("api/auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token_and_identity() -> TestResult {
        let mut app = TestApp::default();
        let caller = admin();
        let expected = caller.clone();

        app.auth
            .expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "root@example.com" && credentials.password == "secret"
            })
            .return_once(move |_| {
                Ok(Session {
                    token: "jwt".to_string(),
                    caller,
                })
            });

        let mut res = TestClient::post("http://example.com/api/auth/login")
            .json(&json!({ "email": "root@example.com", "password": "secret" }))
            .send(&make_service(app))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.token, "jwt");
        assert_eq!(body.id, expected.uuid.into_uuid());
        assert_eq!(body.email, expected.email);
        assert_eq!(body.role, "ADMIN");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_bad_credentials_returns_401() -> TestResult {
        let mut app = TestApp::default();

        app.auth
            .expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/api/auth/login")
            .json(&json!({ "email": "root@example.com", "password": "wrong" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_storage_failure_returns_500() -> TestResult {
        let mut app = TestApp::default();

        app.auth
            .expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::Repository(RepositoryError::InvalidData)));

        let res = TestClient::post("http://example.com/api/auth/login")
            .json(&json!({ "email": "root@example.com", "password": "secret" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
