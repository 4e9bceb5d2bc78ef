//! Workflows

pub mod data;
mod effects;
pub mod errors;
mod events;
pub mod records;
mod repository;
pub mod service;

pub use errors::WorkflowsServiceError;
pub use events::*;
pub use repository::*;
pub use service::*;
