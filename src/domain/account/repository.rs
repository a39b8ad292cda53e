//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, AccountId};
use crate::domain::DomainError;

/// Repository trait for account storage.
///
/// `create` and `update` must enforce email uniqueness inside the store's
/// own serialization boundary, so a concurrent duplicate registration cannot
/// slip in between a caller's check and its write.
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Get an account by its ID
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Look up an account by its email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Replace an existing account record as a whole
    async fn update(&self, account: &Account) -> Result<Account, DomainError>;

    /// Remove an account, returning whether it existed
    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError>;

    /// Check whether an email address is already taken
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
