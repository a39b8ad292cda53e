//! Account field validation

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur during account validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountValidationError {
    #[error("Email is required")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email is not a valid address")]
    MalformedEmail,

    #[error("Name is required")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Password is required")]
    EmptyPassword,

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MAX_EMAIL_LENGTH: usize = 320;
const MAX_NAME_LENGTH: usize = 256;
const MAX_PASSWORD_LENGTH: usize = 1024;

/// Validate an email address
///
/// Rules:
/// - Cannot be empty
/// - Maximum 320 characters
/// - Exactly one '@' with non-empty local and domain parts
/// - Domain contains a dot, not at its edges
/// - No whitespace
pub fn validate_email(email: &str) -> Result<(), AccountValidationError> {
    if email.is_empty() {
        return Err(AccountValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AccountValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(AccountValidationError::MalformedEmail);
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(AccountValidationError::MalformedEmail),
    };

    if local.is_empty() || domain.is_empty() {
        return Err(AccountValidationError::MalformedEmail);
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(AccountValidationError::MalformedEmail);
    }

    Ok(())
}

/// Validate a display name
///
/// Rules:
/// - Cannot be empty or blank
/// - Maximum 256 characters
pub fn validate_name(name: &str) -> Result<(), AccountValidationError> {
    if name.trim().is_empty() {
        return Err(AccountValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(AccountValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a plaintext password
///
/// Rules:
/// - Cannot be empty
/// - Maximum 1024 characters
pub fn validate_password(password: &str) -> Result<(), AccountValidationError> {
    if password.is_empty() {
        return Err(AccountValidationError::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AccountValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Accumulates field violations so a caller gets every problem at once
/// instead of only the first
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a single field validator
    pub fn check(&mut self, field: &str, result: Result<(), AccountValidationError>) {
        if let Err(error) = result {
            self.add(field, error.to_string());
        }
    }

    /// Record a violation directly
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when no violations were recorded, otherwise a single
    /// validation error carrying the full field map
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(self.errors))
        }
    }
}
