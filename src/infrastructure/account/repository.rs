//! In-memory account repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::DomainError;

/// In-memory implementation of AccountRepository.
///
/// The account map and the email index are mutated while holding both write
/// locks, making the uniqueness check and the write one atomic unit.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    /// Index for email -> account ID lookup
    email_index: Arc<RwLock<HashMap<String, AccountId>>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial accounts
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let mut account_map = HashMap::new();
        let mut email_map = HashMap::new();

        for account in accounts {
            email_map.insert(account.email().to_string(), account.id());
            account_map.insert(account.id(), account);
        }

        Self {
            accounts: Arc::new(RwLock::new(account_map)),
            email_index: Arc::new(RwLock::new(email_map)),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        // Lock order matches the mutating operations: accounts, then index
        let accounts = self.accounts.read().await;
        let email_index = self.email_index.read().await;

        Ok(email_index
            .get(email)
            .and_then(|account_id| accounts.get(account_id))
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut email_index = self.email_index.write().await;

        if accounts.contains_key(&account.id()) {
            return Err(DomainError::conflict(format!(
                "Account '{}' already exists",
                account.id()
            )));
        }

        if email_index.contains_key(account.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                account.email()
            )));
        }

        email_index.insert(account.email().to_string(), account.id());
        accounts.insert(account.id(), account.clone());

        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut email_index = self.email_index.write().await;

        let Some(old_account) = accounts.get(&account.id()) else {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                account.id()
            )));
        };

        let old_email = old_account.email().to_string();
        let new_email = account.email().to_string();

        // If the email changed, check uniqueness and update the index
        if old_email != new_email {
            if email_index.contains_key(&new_email) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' is already registered",
                    new_email
                )));
            }

            email_index.remove(&old_email);
            email_index.insert(new_email, account.id());
        }

        accounts.insert(account.id(), account.clone());

        Ok(account.clone())
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut email_index = self.email_index.write().await;

        if let Some(account) = accounts.remove(id) {
            email_index.remove(account.email());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_account(email: &str) -> Account {
        Account::new(AccountId::generate(), email, "Test", "hashed_password")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryAccountRepository::new();
        let account = create_test_account("a@x.com");

        repo.create(account.clone()).await.unwrap();

        let retrieved = repo.get(&account.id()).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().email(), "a@x.com");
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryAccountRepository::new();
        let account = create_test_account("a@x.com");

        repo.create(account.clone()).await.unwrap();

        let retrieved = repo.find_by_email("a@x.com").await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().id(), account.id());

        let not_found = repo.find_by_email("missing@x.com").await.unwrap();
        assert!(not_found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = InMemoryAccountRepository::new();

        repo.create(create_test_account("a@x.com")).await.unwrap();

        let result = repo.create(create_test_account("a@x.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_first_account_survives_duplicate_attempt() {
        let repo = InMemoryAccountRepository::new();
        let first = create_test_account("a@x.com");

        repo.create(first.clone()).await.unwrap();
        let _ = repo.create(create_test_account("a@x.com")).await;

        let retrieved = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(retrieved.id(), first.id());
        assert_eq!(retrieved.name(), first.name());
    }

    #[tokio::test]
    async fn test_update_reindexes_email() {
        let repo = InMemoryAccountRepository::new();
        let mut account = create_test_account("a@x.com");

        repo.create(account.clone()).await.unwrap();

        account.set_email("b@x.com");
        repo.update(&account).await.unwrap();

        // Old email should no longer be found
        let old = repo.find_by_email("a@x.com").await.unwrap();
        assert!(old.is_none());

        // New email should be found
        let new = repo.find_by_email("b@x.com").await.unwrap();
        assert!(new.is_some());
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let repo = InMemoryAccountRepository::new();
        let account1 = create_test_account("a@x.com");
        let mut account2 = create_test_account("b@x.com");

        repo.create(account1).await.unwrap();
        repo.create(account2.clone()).await.unwrap();

        account2.set_email("a@x.com"); // Try to take an existing email

        let result = repo.update(&account2).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_same_email_is_not_a_conflict() {
        let repo = InMemoryAccountRepository::new();
        let mut account = create_test_account("a@x.com");

        repo.create(account.clone()).await.unwrap();

        account.set_name("Renamed");
        let updated = repo.update(&account).await.unwrap();
        assert_eq!(updated.name(), "Renamed");
        assert_eq!(updated.email(), "a@x.com");
    }

    #[tokio::test]
    async fn test_update_unknown_account() {
        let repo = InMemoryAccountRepository::new();
        let account = create_test_account("a@x.com");

        let result = repo.update(&account).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryAccountRepository::new();
        let account = create_test_account("a@x.com");

        repo.create(account.clone()).await.unwrap();

        let deleted = repo.delete(&account.id()).await.unwrap();
        assert!(deleted);

        let retrieved = repo.get(&account.id()).await.unwrap();
        assert!(retrieved.is_none());

        // Email should also be removed from the index
        let by_email = repo.find_by_email("a@x.com").await.unwrap();
        assert!(by_email.is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_account() {
        let repo = InMemoryAccountRepository::new();

        let deleted = repo.delete(&AccountId::generate()).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_with_accounts() {
        let accounts = vec![
            create_test_account("a@x.com"),
            create_test_account("b@x.com"),
        ];

        let repo = InMemoryAccountRepository::with_accounts(accounts);

        assert!(repo.find_by_email("a@x.com").await.unwrap().is_some());
        assert!(repo.find_by_email("b@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_registrations_only_one_wins() {
        let repo = Arc::new(InMemoryAccountRepository::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create(create_test_account("race@x.com")).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
    }
}
