//! Account infrastructure module
//!
//! Concrete implementations around the account domain: Argon2 password
//! hashing, the in-memory repository, and the account service.

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryAccountRepository;
pub use service::{AccountService, RegisterAccountRequest, UpdateAccountRequest};
