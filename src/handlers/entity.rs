//! Generated CRUD handlers. Each is mounted per model with the model name bound at startup.

use crate::config::ModelDefinition;
use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn model<'a>(state: &'a AppState, name: &str) -> Result<&'a ModelDefinition, AppError> {
    state.registry.get(name).ok_or_else(|| AppError::NotFound(name.to_string()))
}

pub async fn list(State(state): State<AppState>, model_name: String) -> Result<impl IntoResponse, AppError> {
    let model = model(&state, &model_name)?;
    let rows = state.store.list(model).await?;
    Ok((StatusCode::OK, Json(Value::Array(rows))))
}

pub async fn create(
    State(state): State<AppState>,
    model_name: String,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let model = model(&state, &model_name)?;
    let row = state.store.create(model, body_to_map(body)?).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn read(
    State(state): State<AppState>,
    model_name: String,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let model = model(&state, &model_name)?;
    let row = state
        .store
        .read(model, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", model_name, id)))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn update(
    State(state): State<AppState>,
    model_name: String,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let model = model(&state, &model_name)?;
    let row = state
        .store
        .update(model, &id, body_to_map(body)?)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", model_name, id)))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn delete(
    State(state): State<AppState>,
    model_name: String,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let model = model(&state, &model_name)?;
    let row = state.store.delete(model, &id).await?;
    Ok((StatusCode::OK, Json(row)))
}
