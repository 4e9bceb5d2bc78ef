//! Request tracing settings, fixed once at startup.

use std::{sync::OnceLock, time::Duration};

use crate::config::observability::ObservabilityConfig;

#[derive(Debug, Clone, Copy)]
struct RequestTracing {
    slow_request: Duration,
    parent_propagation: bool,
}

impl Default for RequestTracing {
    fn default() -> Self {
        Self {
            slow_request: Duration::from_millis(500),
            parent_propagation: false,
        }
    }
}

static REQUEST_TRACING: OnceLock<RequestTracing> = OnceLock::new();

/// Later calls are ignored; the first configuration wins.
pub(super) fn install(config: &ObservabilityConfig) {
    _ = REQUEST_TRACING.set(RequestTracing {
        slow_request: config.slow_request_threshold(),
        parent_propagation: config.parent_propagation(),
    });
}

fn current() -> RequestTracing {
    REQUEST_TRACING.get().copied().unwrap_or_default()
}

pub(super) fn slow_request_threshold() -> Duration {
    current().slow_request
}

pub(super) fn parent_propagation_enabled() -> bool {
    current().parent_propagation
}
