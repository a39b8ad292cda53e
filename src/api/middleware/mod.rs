//! API middleware components

mod auth;

pub use auth::{extract_bearer_token, CurrentAccount};
