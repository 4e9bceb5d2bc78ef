//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use workhub_app::{
    auth::{Caller, MockAuthService},
    context::AppContext,
    domain::{
        audit::MockAuditService,
        dashboard::MockDashboardService,
        notifications::MockNotificationsService,
        users::records::{Role, UserUuid},
        workflows::{
            MockWorkflowsService,
            records::{WorkflowRecord, WorkflowStatus, WorkflowUuid},
        },
    },
};

use crate::state::State;

pub(crate) fn caller(role: Role) -> Caller {
    let name = match role {
        Role::Admin => "Root",
        Role::Employee => "Ada",
    };

    Caller {
        uuid: UserUuid::new(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role,
    }
}

pub(crate) fn admin() -> Caller {
    caller(Role::Admin)
}

pub(crate) fn employee() -> Caller {
    caller(Role::Employee)
}

pub(crate) fn make_workflow(uuid: WorkflowUuid, requester: UserUuid) -> WorkflowRecord {
    WorkflowRecord {
        uuid,
        title: "New laptop".to_string(),
        description: String::new(),
        status: WorkflowStatus::Pending,
        requester,
        approver: None,
        created_at: Timestamp::UNIX_EPOCH,
        approved_at: None,
    }
}

/// Mocked services for handler tests. Any call without a matching expectation
/// fails the test.
#[derive(Default)]
pub(crate) struct TestApp {
    pub auth: MockAuthService,
    pub workflows: MockWorkflowsService,
    pub notifications: MockNotificationsService,
    pub audit: MockAuditService,
    pub dashboard: MockDashboardService,
}

impl TestApp {
    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            workflows: Arc::new(self.workflows),
            notifications: Arc::new(self.notifications),
            audit: Arc::new(self.audit),
            dashboard: Arc::new(self.dashboard),
        })
    }

    /// Serve `route` without any caller attached.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as if `caller` had already been authenticated.
    pub(crate) fn service_as(self, caller: Caller, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject(caller))
                .push(route),
        )
    }
}
