//! Shared test infrastructure.

mod helpers;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
pub(crate) use helpers::*;
pub(crate) use memory::MemoryStore;
