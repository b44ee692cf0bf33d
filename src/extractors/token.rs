//! Extract the presented credential from the request: the credential cookie, else a Bearer header.

use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

/// Token presented with the request, if any. Never rejects; the gate decides what a missing token means.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentedToken(pub Option<String>);

impl PresentedToken {
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        let token = cookie_value(headers, cookie_name)
            .filter(|t| !t.is_empty())
            .or_else(|| bearer_token(headers))
            .filter(|t| !t.is_empty());
        PresentedToken(token)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

#[async_trait]
impl FromRequestParts<AppState> for PresentedToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(PresentedToken::from_headers(&parts.headers, state.gate.cookie_name()))
    }
}
