//! Login and logout. Both are exempt from the credential check.

use crate::error::{AppError, AuthError};
use crate::extractors::ApiJson;
use crate::response::message;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Absent fields are accepted here and fail the credential check instead.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

fn set_cookie(value: String) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&value).map_err(|e| AppError::from(AuthError::Signing(format!("cookie header: {}", e))))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(AuthError::BadLogin.into());
    };
    let credential = state.gate.login(&username, &password)?;
    let cookie = set_cookie(state.gate.issue_cookie(&credential))?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            message: "Logged in successfully".into(),
            token: credential.token,
            expires_at: credential.expires_at,
        }),
    ))
}

pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cookie = set_cookie(state.gate.logout())?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        message("Logged out successfully"),
    ))
}
