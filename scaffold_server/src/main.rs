//! Scaffold server: reads the model set and descriptors, synthesizes the API document, and serves the
//! generated routes behind the auth gate.
//!
//! Run from repo root: `cargo run -p scaffold-server`

use api_scaffold::{serve_router, AppState, DtoDirectory, ModelRegistry, ScaffoldConfig, SchemaFile};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("api_scaffold=info,scaffold_server=info")),
        )
        .init();

    let config = ScaffoldConfig::from_env()?;

    // refuse to start without a model set rather than serve an empty document
    let names = SchemaFile::new(&config.sources.schema_path);
    let descriptors = DtoDirectory::new(&config.sources.dto_dir);
    let registry = ModelRegistry::load(&names, &descriptors).map_err(|e| {
        tracing::error!(error = %e, "cannot load model set");
        e
    })?;
    tracing::info!(
        models = registry.len(),
        schema = %config.sources.schema_path.display(),
        dto_dir = %descriptors.dir().display(),
        "model registry built"
    );

    let state = AppState::from_config(registry, &config);
    let app = serve_router(state, &config.server)?;

    let listener = TcpListener::bind(config.server.bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on http://{}", addr);
    tracing::info!("API docs at http://{}/api-docs", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
