//! Workflow Handlers

pub(crate) mod approve;
pub(crate) mod create;
pub(crate) mod mine;
pub(crate) mod pending;
pub(crate) mod reject;
pub(crate) mod timeline;
