//! Auth middleware.
//!
//! [`authenticate`] resolves a bearer token into a [`Caller`] and
//! [`authorize`] applies the route-prefix [`AccessPolicy`] to the result.
//! Both run in that order on every `/api` request.
//!
//! [`Caller`]: workhub_app::auth::Caller
//! [`AccessPolicy`]: workhub_app::auth::AccessPolicy

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};
use workhub_app::auth::{Access, AuthServiceError, Decision};

use crate::{
    extensions::*,
    observability::{AuthRejection, record_auth_rejection},
    state::State,
};

#[salvo::handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state.clone(),
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    // Public routes are served without looking at credentials.
    if state.policy.access_for(req.uri().path()) == Access::Public {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    // Without a bearer token the call continues anonymously; `authorize`
    // decides whether that is acceptable for the route.
    let Some(token) = extract_bearer_token(req).map(ToOwned::to_owned) else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    match state.app.auth.authenticate_bearer(&token).await {
        Ok(caller) => {
            debug!(user = %caller.uuid, role = %caller.role, "authenticated request");

            depot.insert_caller(caller);
        }
        Err(AuthServiceError::Token(source)) => {
            debug!("rejected bearer token: {source}");
            record_auth_rejection(AuthRejection::InvalidToken);

            res.render(StatusError::unauthorized().brief("Invalid or expired token"));
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::UnknownIdentity) => {
            record_auth_rejection(AuthRejection::UnknownIdentity);

            res.render(StatusError::unauthorized().brief("Invalid or expired token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate bearer token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn authorize(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let decision = match depot.obtain::<Arc<State>>() {
        Ok(state) => state.policy.decide(req.uri().path(), depot.caller()),
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    match decision {
        Decision::Allow => {
            ctrl.call_next(req, depot, res).await;
        }
        Decision::Unauthenticated => {
            record_auth_rejection(AuthRejection::Unauthenticated);

            res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
            ctrl.skip_rest();
        }
        Decision::Forbidden => {
            record_auth_rejection(AuthRejection::Forbidden);

            res.render(StatusError::forbidden().brief("Insufficient role for this resource"));
            ctrl.skip_rest();
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
