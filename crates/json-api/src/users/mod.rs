//! Users

pub(crate) mod profile;
