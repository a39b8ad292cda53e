//! JWT-based caller resolution

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::account::{Account, AccountId};
use crate::domain::principal::{CallerResolver, Principal};
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl AuthClaims {
    /// Create new claims for an account
    pub fn new(account: &Account, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: account.id().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Get the account ID the token was issued for
    pub fn account_id(&self) -> &str {
        &self.sub
    }
}

/// Configuration for the JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and validating tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
        }
    }
}

/// Caller resolution backed by HS256 tokens with a shared secret.
///
/// Token issuance lives with the external authentication mechanism; the
/// `generate` method exists for operational tooling and tests.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(JwtConfig::default())
    }

    /// Generate a token identifying an account
    pub fn generate(&self, account: &Account) -> Result<String, DomainError> {
        let claims = AuthClaims::new(account, self.config.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<AuthClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<AuthClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::unauthenticated(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

impl CallerResolver for JwtService {
    fn resolve(&self, credentials: &str) -> Option<Principal> {
        let claims = self.validate(credentials).ok()?;
        let account_id = AccountId::parse(claims.account_id()).ok()?;
        Some(Principal::new(account_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_account() -> Account {
        Account::new(AccountId::generate(), "a@x.com", "A", "hashed_password")
    }

    #[test]
    fn test_generate_and_validate() {
        let service = JwtService::with_default_config();
        let account = create_test_account();

        let token = service.generate(&account).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.account_id(), account.id().to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_garbage_token() {
        let service = JwtService::with_default_config();

        let result = service.validate("not-a-token");
        assert!(matches!(result, Err(DomainError::Unauthenticated { .. })));
    }

    #[test]
    fn test_validate_wrong_secret() {
        let issuing = JwtService::new(JwtConfig::new("secret-a", 24));
        let validating = JwtService::new(JwtConfig::new("secret-b", 24));
        let account = create_test_account();

        let token = issuing.generate(&account).unwrap();
        assert!(validating.validate(&token).is_err());
    }

    #[test]
    fn test_resolve_returns_principal() {
        let service = JwtService::with_default_config();
        let account = create_test_account();

        let token = service.generate(&account).unwrap();
        let principal = service.resolve(&token).unwrap();

        assert_eq!(principal.account_id(), account.id());
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        let service = JwtService::with_default_config();

        assert!(service.resolve("garbage").is_none());
        assert!(service.resolve("").is_none());
    }
}
