//! Post-commit side effects.

use std::{error::Error, future::Future, panic::AssertUnwindSafe, pin::Pin};

use futures::FutureExt;
use tracing::{error, warn};

use crate::domain::workflows::records::WorkflowUuid;

pub(crate) type EffectError = Box<dyn Error + Send + Sync>;

type EffectFuture<'a> = Pin<Box<dyn Future<Output = Result<(), EffectError>> + Send + 'a>>;

/// Ordered list of best-effort tasks run after a workflow change commits.
///
/// Tasks run one at a time in insertion order. A failing or panicking task is
/// logged and the rest still run; nothing is retried or returned to the caller.
pub(crate) struct SideEffects<'a> {
    workflow: WorkflowUuid,
    tasks: Vec<(&'static str, EffectFuture<'a>)>,
}

impl<'a> SideEffects<'a> {
    pub(crate) fn new(workflow: WorkflowUuid) -> Self {
        Self {
            workflow,
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn then<F>(mut self, name: &'static str, task: F) -> Self
    where
        F: Future<Output = Result<(), EffectError>> + Send + 'a,
    {
        self.tasks.push((name, Box::pin(task)));
        self
    }

    pub(crate) async fn run(self) {
        for (name, task) in self.tasks {
            match AssertUnwindSafe(task).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    warn!(
                        workflow = %self.workflow,
                        effect = name,
                        error = %error,
                        "workflow side effect failed"
                    );
                }
                Err(_) => {
                    error!(
                        workflow = %self.workflow,
                        effect = name,
                        "workflow side effect panicked"
                    );
                }
            }
        }
    }
}
