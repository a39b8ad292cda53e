//! HTTP error types

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::DomainError;

/// Error response body. Validation failures carry a field→message map
/// (`{"errors": {...}}`), everything else a single message
/// (`{"error": "..."}`).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Message { error: String },
    Fields { errors: BTreeMap<String, String> },
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiError {
    /// Create an error with a single message body
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody::Message {
                error: message.into(),
            },
        }
    }

    /// Bad request with a field-attributed error map
    pub fn validation(errors: BTreeMap<String, String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody::Fields { errors },
        }
    }

    /// Bad request with a single message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Authentication error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { errors } => Self::validation(errors),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Unauthenticated { message } => Self::unauthorized(message),
            DomainError::Storage { message } => Self::internal(message),
            DomainError::Configuration { message } => Self::internal(message),
            DomainError::Internal { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            ApiErrorBody::Message { error } => write!(f, "{}: {}", self.status, error),
            ApiErrorBody::Fields { errors } => {
                write!(f, "{}: {} field error(s)", self.status, errors.len())
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::not_found("Account 'abc' not found");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_message_body_serialization() {
        let err = ApiError::not_found("Account not found");
        let json = serde_json::to_string(&err.body).unwrap();

        assert_eq!(json, r#"{"error":"Account not found"}"#);
    }

    #[test]
    fn test_fields_body_serialization() {
        let mut errors = BTreeMap::new();
        errors.insert("email".to_string(), "Email is required".to_string());
        errors.insert("name".to_string(), "Name is required".to_string());

        let err = ApiError::validation(errors);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let json = serde_json::to_string(&err.body).unwrap();
        assert_eq!(
            json,
            r#"{"errors":{"email":"Email is required","name":"Name is required"}}"#
        );
    }

    #[test]
    fn test_domain_error_conversion() {
        let api_err: ApiError = DomainError::not_found("Account not found").into();
        assert_eq!(api_err.status, StatusCode::NOT_FOUND);

        let api_err: ApiError = DomainError::conflict("Email taken").into();
        assert_eq!(api_err.status, StatusCode::CONFLICT);

        let api_err: ApiError = DomainError::unauthenticated("No caller").into();
        assert_eq!(api_err.status, StatusCode::UNAUTHORIZED);

        let api_err: ApiError = DomainError::storage("Backend down").into();
        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_conversion_keeps_field_map() {
        let domain_err = DomainError::validation_field("email", "Email is required");
        let api_err: ApiError = domain_err.into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        match api_err.body {
            ApiErrorBody::Fields { errors } => {
                assert_eq!(errors["email"], "Email is required");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }
}
