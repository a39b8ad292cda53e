//! Account Service
//!
//! A minimal CRUD HTTP API for user accounts: register, fetch, update,
//! delete, and fetch the current authenticated account. Enforces field
//! validation, email uniqueness, and hashed-at-rest passwords; storage and
//! caller identity resolution are injected collaborators.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::account::{AccountService, Argon2Hasher, InMemoryAccountRepository};
use infrastructure::auth::{JwtConfig, JwtService};

/// Build the application state backed by the in-memory account store
pub fn create_app_state(config: &AppConfig) -> AppState {
    let repository = Arc::new(InMemoryAccountRepository::new());
    let hasher = Arc::new(Argon2Hasher::new());
    let account_service = Arc::new(AccountService::new(repository, hasher));

    let caller_resolver = Arc::new(JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiration_hours,
    )));

    AppState::new(account_service, caller_resolver)
}
