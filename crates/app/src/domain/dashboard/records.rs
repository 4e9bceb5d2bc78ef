//! Dashboard Records

use crate::domain::workflows::records::StatusCounts;

/// Workflow counts for a single requester.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserSummary {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl From<StatusCounts> for UserSummary {
    fn from(counts: StatusCounts) -> Self {
        Self {
            total: counts.total(),
            pending: counts.pending,
            approved: counts.approved,
            rejected: counts.rejected,
        }
    }
}

/// Workflow counts across the whole organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizationSummary {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl From<StatusCounts> for OrganizationSummary {
    fn from(counts: StatusCounts) -> Self {
        Self {
            pending: counts.pending,
            approved: counts.approved,
            rejected: counts.rejected,
        }
    }
}
