//! Derives the HTTP surface from the model registry: route tables and the API document.

pub mod openapi;
pub mod route_table;
pub mod synthesizer;

pub use openapi::ApiDocument;
pub use route_table::{route_table, routes_for, CrudMethod, RouteDefinition};
pub use synthesizer::{synthesize, synthesize_with, DocumentMeta};
