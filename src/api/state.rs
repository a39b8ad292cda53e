//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::principal::CallerResolver;
use crate::domain::DomainError;
use crate::infrastructure::account::{
    AccountService, PasswordHasher, RegisterAccountRequest, UpdateAccountRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub caller_resolver: Arc<dyn CallerResolver>,
}

/// Trait for account service operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError>;
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;
    async fn update(
        &self,
        id: &AccountId,
        request: UpdateAccountRequest,
    ) -> Result<Account, DomainError>;
    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError>;
}

#[async_trait::async_trait]
impl<R: AccountRepository + 'static, H: PasswordHasher + 'static> AccountServiceTrait
    for AccountService<R, H>
{
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError> {
        AccountService::register(self, request).await
    }

    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        AccountService::get(self, id).await
    }

    async fn update(
        &self,
        id: &AccountId,
        request: UpdateAccountRequest,
    ) -> Result<Account, DomainError> {
        AccountService::update(self, id, request).await
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError> {
        AccountService::delete(self, id).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        account_service: Arc<dyn AccountServiceTrait>,
        caller_resolver: Arc<dyn CallerResolver>,
    ) -> Self {
        Self {
            account_service,
            caller_resolver,
        }
    }
}
