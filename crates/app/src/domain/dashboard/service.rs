//! Dashboard service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Caller,
    domain::{
        dashboard::{
            DashboardServiceError,
            records::{OrganizationSummary, UserSummary},
        },
        workflows::WorkflowsRepository,
    },
};

/// Read-only projections over workflow state, recomputed on every call.
#[derive(Clone)]
pub struct DefaultDashboardService {
    workflows: Arc<dyn WorkflowsRepository>,
}

impl DefaultDashboardService {
    #[must_use]
    pub fn new(workflows: Arc<dyn WorkflowsRepository>) -> Self {
        Self { workflows }
    }
}

impl std::fmt::Debug for DefaultDashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultDashboardService")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DashboardService for DefaultDashboardService {
    async fn user_summary(&self, caller: &Caller) -> Result<UserSummary, DashboardServiceError> {
        let counts = self.workflows.status_counts(Some(caller.uuid)).await?;

        Ok(counts.into())
    }

    async fn organization_summary(
        &self,
        caller: &Caller,
    ) -> Result<OrganizationSummary, DashboardServiceError> {
        if !caller.is_admin() {
            return Err(DashboardServiceError::Forbidden);
        }

        let counts = self.workflows.status_counts(None).await?;

        Ok(counts.into())
    }
}

#[automock]
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Counts of the caller's own workflows.
    async fn user_summary(&self, caller: &Caller) -> Result<UserSummary, DashboardServiceError>;

    /// Counts across every requester. Administrators only.
    async fn organization_summary(
        &self,
        caller: &Caller,
    ) -> Result<OrganizationSummary, DashboardServiceError>;
}
