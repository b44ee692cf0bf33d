//! Shared application state. Built once at startup and immutable afterwards, so no locks.

use crate::auth::AuthGate;
use crate::config::{ModelRegistry, ScaffoldConfig};
use crate::generator::{synthesize_with, ApiDocument, DocumentMeta};
use crate::store::{EchoStore, RecordStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub gate: Arc<AuthGate>,
    /// Synthesized once from the registry.
    pub document: Arc<ApiDocument>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(registry: ModelRegistry, gate: AuthGate, meta: &DocumentMeta, store: Arc<dyn RecordStore>) -> Self {
        let document = synthesize_with(registry.models(), meta);
        AppState {
            registry: Arc::new(registry),
            gate: Arc::new(gate),
            document: Arc::new(document),
            store,
        }
    }

    /// State for the scaffold server: echo store, document advertising the configured server URL.
    pub fn from_config(registry: ModelRegistry, config: &ScaffoldConfig) -> Self {
        let meta = DocumentMeta {
            server_url: Some(config.server.public_url()),
            cookie_name: config.auth.cookie_name.clone(),
            ..DocumentMeta::default()
        };
        AppState::new(registry, AuthGate::new(&config.auth), &meta, Arc::new(EchoStore))
    }
}
