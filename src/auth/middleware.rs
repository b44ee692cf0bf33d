//! Route layer that runs the gate before any generated handler.

use crate::error::AppError;
use crate::extractors::PresentedToken;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Reject with 401 (missing) or 403 (invalid/expired); otherwise attach the [`Principal`](super::Principal)
/// to the request extensions and continue.
pub async fn require_credential(
    State(state): State<AppState>,
    token: PresentedToken,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = state.gate.authorize(token.as_deref()).map_err(|e| {
        tracing::debug!(path = %req.uri().path(), error = %e, "request rejected");
        AppError::from(e)
    })?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
