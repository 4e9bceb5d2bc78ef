//! Users

pub mod data;
pub mod records;
mod repository;

pub use repository::*;
