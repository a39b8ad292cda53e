//! Infrastructure layer - concrete implementations of the domain's
//! collaborator interfaces

pub mod account;
pub mod auth;
pub mod logging;
