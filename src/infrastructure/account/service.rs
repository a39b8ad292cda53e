//! Account service for registration and account management

use std::sync::Arc;

use crate::domain::account::{
    validate_email, validate_name, validate_password, Account, AccountId, AccountRepository,
    FieldErrors,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterAccountRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request for partially updating an account. Only supplied fields are
/// touched; a supplied password is re-hashed before it is stored.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Account service enforcing validation, email uniqueness, and
/// hashed-at-rest passwords around account mutation
#[derive(Debug)]
pub struct AccountService<R: AccountRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: AccountRepository, H: PasswordHasher> AccountService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account.
    ///
    /// Every violated field is reported in one validation error. The email
    /// must not belong to an existing account; the password is stored only
    /// as a salted hash.
    pub async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError> {
        let mut errors = FieldErrors::new();
        errors.check("email", validate_email(&request.email));
        errors.check("name", validate_name(&request.name));
        errors.check("password", validate_password(&request.password));
        errors.into_result()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let account = Account::new(
            AccountId::generate(),
            &request.email,
            &request.name,
            password_hash,
        );

        self.repository.create(account).await
    }

    /// Get an account by ID
    pub async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        self.repository.get(id).await
    }

    /// Apply a partial update to an account.
    ///
    /// The full resulting record is re-validated before anything is
    /// committed; all violated fields are reported together. An empty
    /// request leaves the account unchanged.
    pub async fn update(
        &self,
        id: &AccountId,
        request: UpdateAccountRequest,
    ) -> Result<Account, DomainError> {
        let mut account = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Account '{}' not found", id)))?;

        let mut errors = FieldErrors::new();

        if let Some(email) = request.email.as_deref() {
            match validate_email(email) {
                Err(error) => errors.add("email", error.to_string()),
                Ok(()) => {
                    // Uniqueness check excludes the account's own address
                    if email != account.email() && self.repository.email_exists(email).await? {
                        errors.add(
                            "email",
                            format!("Email '{}' is already registered", email),
                        );
                    }
                }
            }
        }

        if let Some(name) = request.name.as_deref() {
            errors.check("name", validate_name(name));
        }

        if let Some(password) = request.password.as_deref() {
            errors.check("password", validate_password(password));
        }

        errors.into_result()?;

        if let Some(email) = request.email {
            account.set_email(email);
        }

        if let Some(name) = request.name {
            account.set_name(name);
        }

        if let Some(password) = request.password {
            let password_hash = self.hasher.hash(&password)?;
            account.set_password_hash(password_hash);
        }

        self.repository.update(&account).await
    }

    /// Delete an account, returning whether it existed
    pub async fn delete(&self, id: &AccountId) -> Result<bool, DomainError> {
        self.repository.delete(id).await
    }
}
