//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Startup errors. Any of these stops the server before it binds.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("model source unavailable at {path}: {reason}")]
    StartupConfigMissing { path: String, reason: String },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("path segment reserved for a fixed route: {0}")]
    ReservedPathSegment(String),
    #[error("model name cannot be used as a path segment: {0:?}")]
    InvalidModelName(String),
    #[error("environment variable {key}: {message}")]
    Env { key: &'static str, message: String },
}

/// Authentication gate rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("credential missing")]
    Missing,
    #[error("credential invalid: {0}")]
    Invalid(String),
    #[error("invalid credentials")]
    BadLogin,
    #[error("credential signing failed: {0}")]
    Signing(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("store: {0}")]
    Store(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Auth(AuthError::Missing) => (StatusCode::UNAUTHORIZED, "auth_missing"),
            AppError::Auth(AuthError::Invalid(_)) => (StatusCode::FORBIDDEN, "auth_invalid"),
            AppError::Auth(AuthError::BadLogin) => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::Auth(AuthError::Signing(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "auth_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_rejections_are_distinguishable() {
        assert_eq!(AppError::from(AuthError::Missing).status_and_code(), (StatusCode::UNAUTHORIZED, "auth_missing"));
        assert_eq!(
            AppError::from(AuthError::Invalid("expired".into())).status_and_code(),
            (StatusCode::FORBIDDEN, "auth_invalid")
        );
        assert_eq!(AppError::from(AuthError::BadLogin).status_and_code().0, StatusCode::UNAUTHORIZED);
    }
}
