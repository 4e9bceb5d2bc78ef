//! Dashboard Handlers

pub(crate) mod admin;
pub(crate) mod employee;
