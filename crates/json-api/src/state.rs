//! State

use std::sync::Arc;

use workhub_app::{auth::AccessPolicy, context::AppContext};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) policy: AccessPolicy,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, policy: AccessPolicy) -> Self {
        Self { app, policy }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app, AccessPolicy::default()))
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
