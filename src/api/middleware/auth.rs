//! Caller authentication middleware

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::account::Account;

/// Extractor that requires a resolved caller identity.
///
/// Pulls the bearer token from the `Authorization` header, resolves it via
/// the injected caller resolver, and loads the caller's own account.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Resolving caller identity");

        let principal = state
            .caller_resolver
            .resolve(&token)
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let account = state
            .account_service
            .get(&principal.account_id())
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        Ok(CurrentAccount(account))
    }
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
    ))
}
