//! App Router

use salvo::Router;

use crate::{audit, auth, dashboard, notifications, users, workflows};

/// Every `/api` route behind the authentication and authorization hoops.
pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .hoop(auth::middleware::authenticate)
        .hoop(auth::middleware::authorize)
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler)),
        )
        .push(Router::with_path("user/profile").get(users::profile::handler))
        .push(
            Router::with_path("workflows")
                .post(workflows::create::handler)
                .push(Router::with_path("my").get(workflows::mine::handler))
                .push(Router::with_path("{workflow}/timeline").get(workflows::timeline::handler)),
        )
        .push(
            Router::with_path("admin")
                .push(
                    Router::with_path("workflows")
                        .push(Router::with_path("pending").get(workflows::pending::handler))
                        .push(
                            Router::with_path("{workflow}/approve").put(workflows::approve::handler),
                        )
                        .push(
                            Router::with_path("{workflow}/reject").put(workflows::reject::handler),
                        ),
                )
                .push(
                    Router::with_path("audit")
                        .get(audit::index::handler)
                        .push(Router::with_path("workflow").get(audit::workflows::handler)),
                ),
        )
        .push(
            Router::with_path("notifications")
                .get(notifications::index::handler)
                .push(
                    Router::with_path("{notification}/read").put(notifications::read::handler),
                ),
        )
        .push(
            Router::with_path("dashboard")
                .push(Router::with_path("employee").get(dashboard::employee::handler))
                .push(Router::with_path("admin").get(dashboard::admin::handler)),
        )
}
