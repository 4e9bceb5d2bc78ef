//! Workflows service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    auth::Caller,
    clock::Clock,
    domain::{
        audit::{AuditService, data::NewAuditEntry, records::WORKFLOW_ENTITY_TYPE},
        notifications::NotificationsService,
        users::{UsersRepository, records::Role},
        workflows::{
            WorkflowEventsRepository, WorkflowsRepository, WorkflowsServiceError,
            data::{NewWorkflow, NewWorkflowEvent, WorkflowDraft, WorkflowResolution},
            effects::{EffectError, SideEffects},
            records::{
                Resolution, WorkflowAction, WorkflowEventRecord, WorkflowEventUuid,
                WorkflowRecord, WorkflowStatus, WorkflowUuid,
            },
        },
    },
    mail::{MailTransport, status_update_mail},
};

/// Collaborators the workflow service writes to after a change commits.
#[derive(Clone)]
pub struct WorkflowSideEffects {
    pub events: Arc<dyn WorkflowEventsRepository>,
    pub audit: Arc<dyn AuditService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub mail: Arc<dyn MailTransport>,
}

#[derive(Clone)]
pub struct DefaultWorkflowsService {
    workflows: Arc<dyn WorkflowsRepository>,
    users: Arc<dyn UsersRepository>,
    effects: WorkflowSideEffects,
    clock: Arc<dyn Clock>,
}

impl DefaultWorkflowsService {
    #[must_use]
    pub fn new(
        workflows: Arc<dyn WorkflowsRepository>,
        users: Arc<dyn UsersRepository>,
        effects: WorkflowSideEffects,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            workflows,
            users,
            effects,
            clock,
        }
    }

    async fn resolve(
        &self,
        caller: &Caller,
        workflow: WorkflowUuid,
        resolution: Resolution,
    ) -> Result<WorkflowRecord, WorkflowsServiceError> {
        if !caller.is_admin() {
            return Err(WorkflowsServiceError::Forbidden);
        }

        let current = self
            .workflows
            .find_by_uuid(workflow)
            .await?
            .ok_or(WorkflowsServiceError::NotFound)?;

        let status = current
            .status
            .transition(resolution)
            .ok_or(WorkflowsServiceError::InvalidTransition(current.status))?;

        let resolved = self
            .workflows
            .resolve_pending(
                workflow,
                WorkflowResolution {
                    status,
                    approver: caller.uuid,
                    approved_at: self.clock.now(),
                },
            )
            .await?;

        let Some(resolved) = resolved else {
            // Lost a race with another resolution, or the row vanished.
            return match self.workflows.find_by_uuid(workflow).await? {
                Some(latest) => Err(WorkflowsServiceError::InvalidTransition(latest.status)),
                None => Err(WorkflowsServiceError::NotFound),
            };
        };

        info!(
            workflow = %resolved.uuid,
            approver = %caller.uuid,
            status = %resolved.status,
            "resolved workflow"
        );

        SideEffects::new(resolved.uuid)
            .then("event", self.append_event(&resolved, caller))
            .then("audit", self.audit(&resolved, caller))
            .then("notification", self.notify_requester(&resolved))
            .then("mail", self.mail_requester(&resolved))
            .run()
            .await;

        Ok(resolved)
    }

    async fn append_event(
        &self,
        workflow: &WorkflowRecord,
        caller: &Caller,
    ) -> Result<(), EffectError> {
        self.effects
            .events
            .append(NewWorkflowEvent {
                uuid: WorkflowEventUuid::new(),
                workflow: workflow.uuid,
                status: workflow.status,
                action: WorkflowAction::for_status(workflow.status),
                performed_by: caller.email.clone(),
                created_at: self.clock.now(),
            })
            .await?;

        Ok(())
    }

    async fn audit(&self, workflow: &WorkflowRecord, caller: &Caller) -> Result<(), EffectError> {
        self.effects
            .audit
            .record(NewAuditEntry {
                action: WorkflowAction::for_status(workflow.status).to_string(),
                entity_type: WORKFLOW_ENTITY_TYPE.to_string(),
                entity: workflow.uuid.into_uuid(),
                performed_by: caller.email.clone(),
                role: caller.role,
            })
            .await?;

        Ok(())
    }

    async fn notify_requester(&self, workflow: &WorkflowRecord) -> Result<(), EffectError> {
        let message = format!("Your request '{}' was {}", workflow.title, workflow.status);

        self.effects
            .notifications
            .notify(workflow.requester, message)
            .await?;

        Ok(())
    }

    async fn notify_admins(
        &self,
        workflow: &WorkflowRecord,
        caller: &Caller,
    ) -> Result<(), EffectError> {
        let message = format!("New request submitted by {}", caller.name);

        for admin in self.users.find_by_role(Role::Admin).await? {
            if let Err(error) = self
                .effects
                .notifications
                .notify(admin.uuid, message.clone())
                .await
            {
                warn!(
                    workflow = %workflow.uuid,
                    admin = %admin.uuid,
                    %error,
                    "failed to notify administrator"
                );
            }
        }

        info!(workflow = %workflow.uuid, "notified administrators of new workflow");

        Ok(())
    }

    async fn mail_requester(&self, workflow: &WorkflowRecord) -> Result<(), EffectError> {
        let Some(requester) = self.users.find_by_uuid(workflow.requester).await? else {
            return Err(format!("requester {} not found", workflow.requester).into());
        };

        if requester.email.trim().is_empty() {
            info!(workflow = %workflow.uuid, "requester has no email; skipping status mail");
            return Ok(());
        }

        self.effects
            .mail
            .send(status_update_mail(
                &requester.name,
                &requester.email,
                workflow.status,
            ))
            .await?;

        Ok(())
    }
}

impl std::fmt::Debug for DefaultWorkflowsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultWorkflowsService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WorkflowsService for DefaultWorkflowsService {
    async fn create(
        &self,
        caller: &Caller,
        workflow: NewWorkflow,
    ) -> Result<WorkflowRecord, WorkflowsServiceError> {
        let title = workflow.title.trim();

        if title.is_empty() {
            return Err(WorkflowsServiceError::InvalidData("title must not be blank"));
        }

        let created = self
            .workflows
            .create_workflow(WorkflowDraft {
                uuid: WorkflowUuid::new(),
                title: title.to_string(),
                description: workflow.description,
                requester: caller.uuid,
                created_at: self.clock.now(),
            })
            .await?;

        info!(workflow = %created.uuid, requester = %caller.uuid, "created workflow");

        SideEffects::new(created.uuid)
            .then("event", self.append_event(&created, caller))
            .then("audit", self.audit(&created, caller))
            .then("notification", self.notify_admins(&created, caller))
            .run()
            .await;

        Ok(created)
    }

    async fn list_own(&self, caller: &Caller) -> Result<Vec<WorkflowRecord>, WorkflowsServiceError> {
        Ok(self.workflows.list_by_requester(caller.uuid).await?)
    }

    async fn list_pending(
        &self,
        caller: &Caller,
    ) -> Result<Vec<WorkflowRecord>, WorkflowsServiceError> {
        if !caller.is_admin() {
            return Err(WorkflowsServiceError::Forbidden);
        }

        Ok(self.workflows.list_by_status(WorkflowStatus::Pending).await?)
    }

    async fn approve(
        &self,
        caller: &Caller,
        workflow: WorkflowUuid,
    ) -> Result<WorkflowRecord, WorkflowsServiceError> {
        self.resolve(caller, workflow, Resolution::Approve).await
    }

    async fn reject(
        &self,
        caller: &Caller,
        workflow: WorkflowUuid,
    ) -> Result<WorkflowRecord, WorkflowsServiceError> {
        self.resolve(caller, workflow, Resolution::Reject).await
    }

    async fn timeline(
        &self,
        _caller: &Caller,
        workflow: WorkflowUuid,
    ) -> Result<Vec<WorkflowEventRecord>, WorkflowsServiceError> {
        if self.workflows.find_by_uuid(workflow).await?.is_none() {
            return Err(WorkflowsServiceError::NotFound);
        }

        Ok(self.effects.events.list_for_workflow(workflow).await?)
    }
}

#[automock]
#[async_trait]
pub trait WorkflowsService: Send + Sync {
    /// Raise a pending workflow on behalf of the caller.
    async fn create(
        &self,
        caller: &Caller,
        workflow: NewWorkflow,
    ) -> Result<WorkflowRecord, WorkflowsServiceError>;

    /// Workflows the caller raised, newest first.
    async fn list_own(&self, caller: &Caller) -> Result<Vec<WorkflowRecord>, WorkflowsServiceError>;

    /// Every pending workflow, newest first. Administrators only.
    async fn list_pending(&self, caller: &Caller)
    -> Result<Vec<WorkflowRecord>, WorkflowsServiceError>;

    /// Move a pending workflow to `Approved`. Administrators only.
    async fn approve(
        &self,
        caller: &Caller,
        workflow: WorkflowUuid,
    ) -> Result<WorkflowRecord, WorkflowsServiceError>;

    /// Move a pending workflow to `Rejected`. Administrators only.
    async fn reject(
        &self,
        caller: &Caller,
        workflow: WorkflowUuid,
    ) -> Result<WorkflowRecord, WorkflowsServiceError>;

    /// Events recorded for a workflow in the order they happened.
    async fn timeline(
        &self,
        caller: &Caller,
        workflow: WorkflowUuid,
    ) -> Result<Vec<WorkflowEventRecord>, WorkflowsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;
    use tokio::time::timeout;

    use crate::{
        auth::{AuthService, Credentials, Registration},
        domain::{
            audit::{AuditService, AuditServiceError, MockAuditService},
            dashboard::{DashboardService, records::UserSummary},
            notifications::{MockNotificationsService, NotificationsService, NotificationsServiceError},
            workflows::MockWorkflowsRepository,
        },
        mail::{HttpMailTransport, MockMailTransport, TransportError},
        test::{RecordingMailTransport, TestContext, admin, employee, relay_config, silent_relay},
    };

    use super::*;
    use crate::domain::users::records::UserUuid;

    fn laptop() -> NewWorkflow {
        NewWorkflow {
            title: "New laptop".to_string(),
            description: "Current one is five years old".to_string(),
        }
    }

    async fn actions(ctx: &TestContext, workflow: WorkflowUuid) -> TestResult<Vec<WorkflowAction>> {
        let events = ctx.workflows.timeline(&admin(), workflow).await?;

        Ok(events.into_iter().map(|event| event.action).collect())
    }

    #[tokio::test]
    async fn create_starts_pending_and_binds_requester_to_caller() -> TestResult {
        let ctx = TestContext::new();
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;

        let created = ctx.workflows.create(&ada, laptop()).await?;

        assert_eq!(created.status, WorkflowStatus::Pending);
        assert_eq!(created.requester, ada.uuid);
        assert_eq!(created.title, "New laptop");
        assert!(created.approver.is_none(), "pending workflow has no approver");
        assert!(created.approved_at.is_none(), "pending workflow has no approval time");
        assert!(created.is_consistent(), "status and resolution must agree");

        Ok(())
    }

    #[tokio::test]
    async fn create_with_blank_title_is_rejected() -> TestResult {
        let ctx = TestContext::new();
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;

        let result = ctx
            .workflows
            .create(
                &ada,
                NewWorkflow {
                    title: "   ".to_string(),
                    description: String::new(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(WorkflowsServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );
        assert!(ctx.workflows.list_own(&ada).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_records_event_audit_and_notifies_every_admin() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ops = ctx.user("Ops", "ops@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;

        let created = ctx.workflows.create(&ada, laptop()).await?;

        let events = ctx.workflows.timeline(&ada, created.uuid).await?;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, WorkflowAction::Created);
        assert_eq!(events[0].status, WorkflowStatus::Pending);
        assert_eq!(events[0].performed_by, "ada@example.com");

        let audit = ctx.audit.list_all(&root).await?;

        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].action, "CREATED");
        assert_eq!(audit[0].entity, created.uuid.into_uuid());
        assert_eq!(audit[0].role, Role::Employee);

        for admin in [&root, &ops] {
            let notifications = ctx.notifications.list_for_user(admin).await?;

            assert_eq!(notifications.len(), 1, "each admin gets one notification");
            assert_eq!(notifications[0].message, "New request submitted by Ada");
        }

        assert!(ctx.notifications.list_for_user(&ada).await?.is_empty());
        assert!(ctx.mail.sent().is_empty(), "creation sends no mail");

        Ok(())
    }

    #[tokio::test]
    async fn approve_sets_approver_and_time() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let created = ctx.workflows.create(&ada, laptop()).await?;

        ctx.tick();

        let approved = ctx.workflows.approve(&root, created.uuid).await?;

        assert_eq!(approved.status, WorkflowStatus::Approved);
        assert_eq!(approved.approver, Some(root.uuid));
        assert_eq!(approved.approved_at, Some(ctx.clock.now()));
        assert_eq!(approved.created_at, created.created_at);
        assert_eq!(approved.requester, ada.uuid);
        assert!(approved.is_consistent(), "status and resolution must agree");

        Ok(())
    }

    #[tokio::test]
    async fn reject_notifies_and_mails_requester() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let created = ctx.workflows.create(&ada, laptop()).await?;

        let rejected = ctx.workflows.reject(&root, created.uuid).await?;

        assert_eq!(rejected.status, WorkflowStatus::Rejected);
        assert!(rejected.is_consistent(), "status and resolution must agree");

        let notifications = ctx.notifications.list_for_user(&ada).await?;

        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].message,
            "Your request 'New laptop' was REJECTED"
        );

        let sent = ctx.mail.sent();

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@example.com");
        assert!(sent[0].body.contains("REJECTED"), "mail names the status");

        assert_eq!(
            actions(&ctx, created.uuid).await?,
            [WorkflowAction::Created, WorkflowAction::Rejected]
        );

        Ok(())
    }

    #[tokio::test]
    async fn employees_cannot_resolve_workflows() -> TestResult {
        let ctx = TestContext::new();
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let created = ctx.workflows.create(&ada, laptop()).await?;

        let result = ctx.workflows.approve(&ada, created.uuid).await;

        assert!(
            matches!(result, Err(WorkflowsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let unchanged = WorkflowsRepository::find_by_uuid(&*ctx.store, created.uuid).await?;

        assert_eq!(unchanged, Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn resolving_unknown_workflow_is_not_found() {
        let ctx = TestContext::new();

        let result = ctx.workflows.reject(&admin(), WorkflowUuid::new()).await;

        assert!(
            matches!(result, Err(WorkflowsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn resolving_terminal_workflow_is_invalid_and_leaves_it_unchanged() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let created = ctx.workflows.create(&ada, laptop()).await?;
        let approved = ctx.workflows.approve(&root, created.uuid).await?;

        ctx.tick();

        for result in [
            ctx.workflows.reject(&root, created.uuid).await,
            ctx.workflows.approve(&root, created.uuid).await,
        ] {
            assert!(
                matches!(
                    result,
                    Err(WorkflowsServiceError::InvalidTransition(
                        WorkflowStatus::Approved
                    ))
                ),
                "expected InvalidTransition, got {result:?}"
            );
        }

        let stored = WorkflowsRepository::find_by_uuid(&*ctx.store, created.uuid).await?;

        assert_eq!(stored, Some(approved));
        assert_eq!(
            actions(&ctx, created.uuid).await?,
            [WorkflowAction::Created, WorkflowAction::Approved]
        );

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_approvals_have_exactly_one_winner() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ops = ctx.user("Ops", "ops@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let created = ctx.workflows.create(&ada, laptop()).await?;

        let service = Arc::new(ctx.workflows.clone());

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.approve(&root, created.uuid).await }
        });

        let second = tokio::spawn({
            let service = service.clone();
            async move { service.approve(&ops, created.uuid).await }
        });

        let results = [first.await?, second.await?];

        let winners = results.iter().filter(|result| result.is_ok()).count();
        let losers = results
            .iter()
            .filter(|result| {
                matches!(
                    result,
                    Err(WorkflowsServiceError::InvalidTransition(
                        WorkflowStatus::Approved
                    ))
                )
            })
            .count();

        assert_eq!(winners, 1, "exactly one approval must win: {results:?}");
        assert_eq!(losers, 1, "the other must see InvalidTransition: {results:?}");

        let stored = WorkflowsRepository::find_by_uuid(&*ctx.store, created.uuid)
            .await?
            .ok_or("workflow vanished")?;

        assert_eq!(stored.status, WorkflowStatus::Approved);
        assert_eq!(
            actions(&ctx, created.uuid).await?,
            [WorkflowAction::Created, WorkflowAction::Approved]
        );

        Ok(())
    }

    #[tokio::test]
    async fn losing_the_conditional_update_reports_invalid_transition() {
        let ctx = TestContext::new();
        let pending = WorkflowRecord {
            uuid: WorkflowUuid::new(),
            title: "New laptop".to_string(),
            description: String::new(),
            status: WorkflowStatus::Pending,
            requester: UserUuid::new(),
            approver: None,
            created_at: ctx.clock.now(),
            approved_at: None,
        };
        let rejected = WorkflowRecord {
            status: WorkflowStatus::Rejected,
            approver: Some(UserUuid::new()),
            approved_at: Some(ctx.clock.now()),
            ..pending.clone()
        };

        let mut workflows = MockWorkflowsRepository::new();
        let mut reads = vec![rejected, pending];

        workflows
            .expect_find_by_uuid()
            .times(2)
            .returning(move |_| Ok(reads.pop()));
        workflows
            .expect_resolve_pending()
            .once()
            .return_once(|_, _| Ok(None));

        let service = DefaultWorkflowsService::new(
            Arc::new(workflows),
            ctx.store.clone(),
            ctx.workflows.effects.clone(),
            ctx.clock.clone(),
        );

        let result = service.approve(&admin(), WorkflowUuid::new()).await;

        assert!(
            matches!(
                result,
                Err(WorkflowsServiceError::InvalidTransition(
                    WorkflowStatus::Rejected
                ))
            ),
            "expected InvalidTransition, got {result:?}"
        );
    }

    #[tokio::test]
    async fn mail_failure_does_not_undo_approval() -> TestResult {
        let mut transport = MockMailTransport::new();

        transport
            .expect_send()
            .once()
            .return_once(|_| Err(TransportError::Rejected("relay down".to_string())));

        let ctx = TestContext::with_mail(
            Arc::new(RecordingMailTransport::default()),
            Arc::new(transport),
        );
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let created = ctx.workflows.create(&ada, laptop()).await?;

        let approved = ctx.workflows.approve(&root, created.uuid).await?;

        assert_eq!(approved.status, WorkflowStatus::Approved);
        assert_eq!(
            actions(&ctx, created.uuid).await?,
            [WorkflowAction::Created, WorkflowAction::Approved]
        );
        assert_eq!(ctx.notifications.list_for_user(&ada).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn audit_failure_does_not_stop_later_effects() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let created = ctx.workflows.create(&ada, laptop()).await?;

        let mut audit = MockAuditService::new();

        audit.expect_record().once().return_once(|_| {
            Err(AuditServiceError::Repository(
                crate::database::RepositoryError::InvalidData,
            ))
        });

        let service = DefaultWorkflowsService::new(
            ctx.store.clone(),
            ctx.store.clone(),
            WorkflowSideEffects {
                audit: Arc::new(audit),
                ..ctx.workflows.effects.clone()
            },
            ctx.clock.clone(),
        );

        let approved = service.approve(&root, created.uuid).await?;

        assert_eq!(approved.status, WorkflowStatus::Approved);
        assert_eq!(ctx.notifications.list_for_user(&ada).await?.len(), 1);
        assert_eq!(ctx.mail.sent().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn unresponsive_mail_relay_does_not_hold_approval() -> TestResult {
        let relay = silent_relay().await?;
        let transport =
            HttpMailTransport::new(relay_config(relay, Duration::from_millis(200)))?;
        let ctx = TestContext::with_mail(
            Arc::new(RecordingMailTransport::default()),
            Arc::new(transport),
        );
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let created = ctx.workflows.create(&ada, laptop()).await?;

        let approved = timeout(
            Duration::from_secs(5),
            ctx.workflows.approve(&root, created.uuid),
        )
        .await??;

        assert_eq!(approved.status, WorkflowStatus::Approved);
        assert_eq!(ctx.notifications.list_for_user(&ada).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn failed_admin_notification_does_not_skip_the_rest() -> TestResult {
        let ctx = TestContext::new();
        ctx.user("Root", "root@example.com", Role::Admin).await;
        ctx.user("Ops", "ops@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;

        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_notify()
            .times(2)
            .withf(|_, message| message == "New request submitted by Ada")
            .returning(|_, _| {
                Err(NotificationsServiceError::Repository(
                    crate::database::RepositoryError::InvalidData,
                ))
            });

        let service = DefaultWorkflowsService::new(
            ctx.store.clone(),
            ctx.store.clone(),
            WorkflowSideEffects {
                notifications: Arc::new(notifications),
                ..ctx.workflows.effects.clone()
            },
            ctx.clock.clone(),
        );

        let created = service.create(&ada, laptop()).await?;

        assert_eq!(created.status, WorkflowStatus::Pending);
        assert_eq!(
            actions(&ctx, created.uuid).await?,
            [WorkflowAction::Created]
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_requester_gets_no_mail() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ghost = employee();
        let created = ctx.workflows.create(&ghost, laptop()).await?;

        ctx.workflows.approve(&root, created.uuid).await?;

        assert!(
            ctx.mail.sent().is_empty(),
            "no stored requester means no mail"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_own_is_newest_first_and_scoped_to_caller() -> TestResult {
        let ctx = TestContext::new();
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;
        let bob = ctx.user("Bob", "bob@example.com", Role::Employee).await;

        let first = ctx.workflows.create(&ada, laptop()).await?;
        ctx.tick();
        ctx.workflows.create(&bob, laptop()).await?;
        ctx.tick();
        let second = ctx.workflows.create(&ada, laptop()).await?;

        let mine: Vec<WorkflowUuid> = ctx
            .workflows
            .list_own(&ada)
            .await?
            .into_iter()
            .map(|w| w.uuid)
            .collect();

        assert_eq!(mine, [second.uuid, first.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_pending_is_admin_only_and_excludes_resolved() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;

        let approved = ctx.workflows.create(&ada, laptop()).await?;
        ctx.tick();
        let pending = ctx.workflows.create(&ada, laptop()).await?;

        ctx.workflows.approve(&root, approved.uuid).await?;

        let listed: Vec<WorkflowUuid> = ctx
            .workflows
            .list_pending(&root)
            .await?
            .into_iter()
            .map(|w| w.uuid)
            .collect();

        assert_eq!(listed, [pending.uuid]);

        let result = ctx.workflows.list_pending(&ada).await;

        assert!(
            matches!(result, Err(WorkflowsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn timeline_of_unknown_workflow_is_not_found() {
        let ctx = TestContext::new();

        let result = ctx.workflows.timeline(&employee(), WorkflowUuid::new()).await;

        assert!(
            matches!(result, Err(WorkflowsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn dashboard_counts_follow_workflow_state() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;
        let ada = ctx.user("Ada", "ada@example.com", Role::Employee).await;

        let first = ctx.workflows.create(&ada, laptop()).await?;
        ctx.workflows.create(&ada, laptop()).await?;
        ctx.workflows.create(&ada, laptop()).await?;
        ctx.workflows.approve(&root, first.uuid).await?;

        let summary = ctx.dashboard.user_summary(&ada).await?;

        assert_eq!(
            summary,
            UserSummary {
                total: 3,
                pending: 2,
                approved: 1,
                rejected: 0,
            }
        );

        let organization = ctx.dashboard.organization_summary(&root).await?;

        assert_eq!(organization.pending, 2);
        assert_eq!(organization.approved, 1);
        assert_eq!(ctx.dashboard.user_summary(&root).await?.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn register_login_create_approve_end_to_end() -> TestResult {
        let ctx = TestContext::new();
        let root = ctx.user("Root", "root@example.com", Role::Admin).await;

        ctx.auth
            .register(Registration {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await?;

        let session = ctx
            .auth
            .login(Credentials {
                email: "ada@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await?;

        let ada = ctx.auth.authenticate_bearer(&session.token).await?;

        let created = ctx.workflows.create(&ada, laptop()).await?;

        assert_eq!(created.status, WorkflowStatus::Pending);
        assert_eq!(actions(&ctx, created.uuid).await?, [WorkflowAction::Created]);

        let approved = ctx.workflows.approve(&root, created.uuid).await?;

        assert_eq!(approved.status, WorkflowStatus::Approved);
        assert_eq!(approved.approver, Some(root.uuid));

        let events = ctx.workflows.timeline(&ada, created.uuid).await?;
        let performers: Vec<&str> = events.iter().map(|e| e.performed_by.as_str()).collect();

        assert_eq!(
            events.iter().map(|e| e.action).collect::<Vec<_>>(),
            [WorkflowAction::Created, WorkflowAction::Approved]
        );
        assert_eq!(performers, ["ada@example.com", "root@example.com"]);

        let notifications = ctx.notifications.list_for_user(&ada).await?;

        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].message,
            "Your request 'New laptop' was APPROVED"
        );

        Ok(())
    }
}
