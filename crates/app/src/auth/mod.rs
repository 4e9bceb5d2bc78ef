//! Authentication

mod caller;
mod errors;
mod password;
mod policy;
mod service;
mod token;

pub use caller::*;
pub use errors::*;
pub use password::*;
pub use policy::*;
pub use service::*;
pub use token::*;
