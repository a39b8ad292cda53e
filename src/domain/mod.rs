//! Domain layer - Core business logic and entities

pub mod account;
pub mod error;
pub mod principal;

pub use account::{
    validate_email, validate_name, validate_password, Account, AccountId, AccountRepository,
    AccountValidationError, FieldErrors,
};
pub use error::DomainError;
pub use principal::{CallerResolver, Principal};
