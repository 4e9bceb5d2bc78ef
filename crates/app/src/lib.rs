//! Workhub application domain, authentication, and persistence modules.

pub mod auth;
pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod mail;
pub mod uuids;

#[cfg(test)]
mod test;
