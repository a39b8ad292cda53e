//! User account endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::CurrentAccount;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::account::{Account, AccountId};
use crate::infrastructure::account::{RegisterAccountRequest, UpdateAccountRequest};

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/me", get(get_current_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Request to register a new user.
///
/// Fields are optional at the wire level so that missing values surface in
/// the field-attributed validation map rather than as a parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserApiRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plain_password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request to partially update a user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserApiRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plain_password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Outward-facing account projection. Whitelists the safe fields; the
/// password hash never appears here.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl From<&Account> for UserResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            email: account.email().to_string(),
            name: account.name().to_string(),
            roles: account.roles().to_vec(),
        }
    }
}

/// An id that does not parse cannot name an existing account
fn parse_account_id(id: &str) -> Result<AccountId, ApiError> {
    AccountId::parse(id).map_err(|_| ApiError::not_found(format!("Account '{}' not found", id)))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!("Registering new account");

    let service_request = RegisterAccountRequest {
        email: request.email.unwrap_or_default(),
        password: request.plain_password.unwrap_or_default(),
        name: request.name.unwrap_or_default(),
    };

    let account = state
        .account_service
        .register(service_request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&account))))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(id = %id, "Fetching account");

    let account_id = parse_account_id(&id)?;

    let account = state
        .account_service
        .get(&account_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Account '{}' not found", id)))?;

    Ok(Json(UserResponse::from(&account)))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(id = %id, "Updating account");

    let account_id = parse_account_id(&id)?;

    let service_request = UpdateAccountRequest {
        email: request.email,
        name: request.name,
        password: request.plain_password,
    };

    let account = state
        .account_service
        .update(&account_id, service_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&account)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "Deleting account");

    let account_id = parse_account_id(&id)?;

    let deleted = state
        .account_service
        .delete(&account_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!("Account '{}' not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/me
pub async fn get_current_user(
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from(&account)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "email": "a@x.com",
            "plainPassword": "secret",
            "name": "A"
        }"#;

        let request: CreateUserApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, Some("a@x.com".to_string()));
        assert_eq!(request.plain_password, Some("secret".to_string()));
        assert_eq!(request.name, Some("A".to_string()));
    }

    #[test]
    fn test_create_request_missing_fields() {
        let request: CreateUserApiRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(request.email.is_none());
        assert!(request.plain_password.is_none());
        assert!(request.name.is_none());
    }

    #[test]
    fn test_update_request_partial() {
        let json = r#"{"name": "B"}"#;

        let request: UpdateUserApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, Some("B".to_string()));
        assert!(request.email.is_none());
        assert!(request.plain_password.is_none());
    }

    #[test]
    fn test_update_request_full() {
        let json = r#"{
            "email": "b@x.com",
            "plainPassword": "new_secret",
            "name": "B"
        }"#;

        let request: UpdateUserApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, Some("b@x.com".to_string()));
        assert_eq!(request.plain_password, Some("new_secret".to_string()));
        assert_eq!(request.name, Some("B".to_string()));
    }

    #[test]
    fn test_user_response_projection() {
        let account = Account::new(AccountId::generate(), "a@x.com", "A", "hashed_password");
        let response = UserResponse::from(&account);

        assert_eq!(response.id, account.id().to_string());
        assert_eq!(response.email, "a@x.com");
        assert_eq!(response.name, "A");
        assert_eq!(response.roles, vec!["user".to_string()]);
    }

    #[test]
    fn test_user_response_whitelists_fields() {
        let account = Account::new(AccountId::generate(), "a@x.com", "A", "hashed_password");
        let response = UserResponse::from(&account);

        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert!(object.contains_key("id"));
        assert!(object.contains_key("email"));
        assert!(object.contains_key("name"));
        assert!(object.contains_key("roles"));
    }

    #[test]
    fn test_parse_account_id_rejects_garbage() {
        let err = parse_account_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
