//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use workhub_app::auth::Caller;

/// Helpers for request-scoped values stored in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Attach the authenticated caller for downstream handlers.
    fn insert_caller(&mut self, caller: Caller);

    /// The authenticated caller, if the request carried a valid token.
    fn caller(&self) -> Option<&Caller>;

    fn caller_or_401(&self) -> Result<&Caller, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_caller(&mut self, caller: Caller) {
        self.inject(caller);
    }

    fn caller(&self) -> Option<&Caller> {
        self.obtain::<Caller>().ok()
    }

    fn caller_or_401(&self) -> Result<&Caller, StatusError> {
        self.caller()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}
