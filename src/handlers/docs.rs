use crate::generator::ApiDocument;
use crate::state::AppState;
use axum::{extract::State, Json};

/// The synthesized API document.
pub async fn api_docs(State(state): State<AppState>) -> Json<ApiDocument> {
    Json(state.document.as_ref().clone())
}
