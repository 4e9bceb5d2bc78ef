//! Route-prefix authorization policy.

use crate::{auth::Caller, domain::users::records::Role};

/// Who may reach routes under a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No identity required.
    Public,

    /// Any authenticated caller.
    Authenticated,

    /// Authenticated callers holding one of these roles.
    Roles(&'static [Role]),
}

/// Outcome of evaluating the policy for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Unauthenticated,
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRule {
    pub prefix: &'static str,
    pub access: Access,
}

impl AccessRule {
    #[must_use]
    pub const fn new(prefix: &'static str, access: Access) -> Self {
        Self { prefix, access }
    }

    /// Segment-aware prefix match: `/api/admin` covers `/api/admin/...` but not
    /// `/api/administrator`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.strip_prefix(self.prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const STAFF: &[Role] = &[Role::Admin, Role::Employee];

const DEFAULT_RULES: &[AccessRule] = &[
    AccessRule::new("/api/auth", Access::Public),
    AccessRule::new("/api/admin", Access::Roles(ADMIN_ONLY)),
    AccessRule::new("/api/dashboard/admin", Access::Roles(ADMIN_ONLY)),
    AccessRule::new("/api/workflows", Access::Roles(STAFF)),
    AccessRule::new("/api/notifications", Access::Roles(STAFF)),
];

/// Ordered rule table, evaluated first match wins. Paths no rule covers
/// require an authenticated caller.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    #[must_use]
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn access_for(&self, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map_or(Access::Authenticated, |rule| rule.access)
    }

    #[must_use]
    pub fn decide(&self, path: &str, caller: Option<&Caller>) -> Decision {
        match (self.access_for(path), caller) {
            (Access::Public, _) => Decision::Allow,
            (_, None) => Decision::Unauthenticated,
            (Access::Authenticated, Some(_)) => Decision::Allow,
            (Access::Roles(roles), Some(caller)) if roles.contains(&caller.role) => {
                Decision::Allow
            }
            (Access::Roles(_), Some(_)) => Decision::Forbidden,
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}
