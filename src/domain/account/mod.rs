//! Account domain
//!
//! This module provides the account entity, field validation, and the
//! repository trait implemented by storage backends.

mod entity;
mod repository;
mod validation;

pub use entity::{Account, AccountId, DEFAULT_ROLE};
pub use repository::AccountRepository;
pub use validation::{
    validate_email, validate_name, validate_password, AccountValidationError, FieldErrors,
};

#[cfg(test)]
pub use repository::mock::MockAccountRepository;
