//! Generated CRUD routes: one axum route per [`RouteDefinition`] of every registered model, all behind
//! the credential check.

use crate::auth::require_credential;
use crate::extractors::ApiJson;
use crate::generator::{route_table, CrudMethod, RouteDefinition};
use crate::handlers::entity;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use serde_json::Value;
use std::collections::BTreeMap;

fn method_router(route: &RouteDefinition) -> MethodRouter<AppState> {
    let name = route.model_name.clone();
    match route.method {
        CrudMethod::List => get(move |state: State<AppState>| entity::list(state, name.clone())),
        CrudMethod::Create => post(move |state: State<AppState>, body: ApiJson<Value>| entity::create(state, name.clone(), body)),
        CrudMethod::Get => get(move |state: State<AppState>, id: Path<String>| entity::read(state, name.clone(), id)),
        CrudMethod::Update => put(move |state: State<AppState>, id: Path<String>, body: ApiJson<Value>| {
            entity::update(state, name.clone(), id, body)
        }),
        CrudMethod::Delete => delete(move |state: State<AppState>, id: Path<String>| entity::delete(state, name.clone(), id)),
    }
}

pub fn entity_routes(state: AppState) -> Router {
    let mut by_path: BTreeMap<String, MethodRouter<AppState>> = BTreeMap::new();
    for route in route_table(state.registry.models()) {
        let handler = method_router(&route);
        let merged = match by_path.remove(&route.axum_path()) {
            Some(existing) => existing.merge(handler),
            None => handler,
        };
        by_path.insert(route.axum_path(), merged);
    }

    if by_path.is_empty() {
        // route_layer needs at least one route
        return Router::new();
    }

    let mut router = Router::new();
    for (path, method_router) in by_path {
        tracing::debug!(path = %path, "mounting generated route");
        router = router.route(&path, method_router);
    }
    router
        .route_layer(middleware::from_fn_with_state(state.clone(), require_credential))
        .with_state(state)
}
