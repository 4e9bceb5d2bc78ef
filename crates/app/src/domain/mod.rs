//! Workhub Domain Concerns

pub mod audit;
pub mod dashboard;
pub mod notifications;
pub mod users;
pub mod workflows;
