//! API scaffold: CRUD routes, an OpenAPI document and an auth gate generated from declared models.

pub mod auth;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod extractors;
pub mod generator;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use auth::{AuthGate, Credential, Principal};
pub use config::{
    AuthConfig, DescriptorSource, DtoDirectory, ModelDefinition, ModelNameSource, ModelRegistry, SchemaFile,
    ScaffoldConfig, StaticDescriptors, StaticModelNames,
};
pub use descriptor::{parse, parse_fields, FieldDescriptor, FieldMap};
pub use error::{AppError, AuthError, ConfigError};
pub use generator::{route_table, routes_for, synthesize, synthesize_with, ApiDocument, CrudMethod, DocumentMeta, RouteDefinition};
pub use response::message;
pub use routes::{app_router, auth_routes, common_routes, entity_routes, serve_router};
pub use state::AppState;
pub use store::{EchoStore, RecordStore};
