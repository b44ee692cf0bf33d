//! Build the API document from the model set: generated CRUD operations, one schema per model,
//! and the fixed login endpoint.

use crate::config::{AuthConfig, ModelDefinition};
use crate::generator::openapi::*;
use crate::generator::route_table::{routes_for, CrudMethod, RouteDefinition};
use std::collections::BTreeMap;
use utoipa::openapi::info::Info;
use utoipa::openapi::server::Server;

pub const LOGIN_SCHEMA: &str = "Login";
pub const LOGIN_PATH: &str = "/login";
pub const COOKIE_SCHEME: &str = "cookieAuth";
pub const BEARER_SCHEME: &str = "bearerAuth";

/// Document header values and the cookie name advertised in `securitySchemes`.
#[derive(Clone, Debug)]
pub struct DocumentMeta {
    pub title: String,
    pub version: String,
    pub server_url: Option<String>,
    pub cookie_name: String,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        DocumentMeta {
            title: "CRUD API".into(),
            version: "1.0.0".into(),
            server_url: None,
            cookie_name: AuthConfig::DEFAULT_COOKIE.into(),
        }
    }
}

/// Document for `models` with default header values.
pub fn synthesize(models: &[ModelDefinition]) -> ApiDocument {
    synthesize_with(models, &DocumentMeta::default())
}

pub fn synthesize_with(models: &[ModelDefinition], meta: &DocumentMeta) -> ApiDocument {
    let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();
    let mut schemas: BTreeMap<String, Schema> = BTreeMap::new();

    for model in models {
        for route in routes_for(model) {
            let replaced = paths
                .entry(route.path.clone())
                .or_default()
                .set(&route.http_method(), crud_operation(&route));
            if replaced.is_some() {
                tracing::warn!(path = %route.path, method = %route.http_method(), "operation generated twice");
            }
        }
        schemas.insert(model.name.clone(), model_schema(model));
    }

    schemas.insert(
        LOGIN_SCHEMA.into(),
        Schema::object(BTreeMap::from([
            ("username".to_string(), Schema::of_type("string")),
            ("password".to_string(), Schema::of_type("string")),
        ])),
    );
    paths.insert(
        LOGIN_PATH.into(),
        PathItem {
            post: Some(login_operation()),
            ..PathItem::default()
        },
    );

    ApiDocument {
        openapi: OPENAPI_VERSION.into(),
        info: Info::new(meta.title.clone(), meta.version.clone()),
        servers: meta.server_url.iter().map(Server::new).collect(),
        paths,
        components: Components {
            schemas,
            security_schemes: BTreeMap::from([
                (COOKIE_SCHEME.to_string(), SecurityScheme::cookie(meta.cookie_name.clone())),
                (BEARER_SCHEME.to_string(), SecurityScheme::bearer_jwt()),
            ]),
        },
    }
}

/// Properties typed by their declared type, or the opaque object marker when no descriptor exists.
fn model_schema(model: &ModelDefinition) -> Schema {
    match &model.fields {
        Some(fields) => Schema::object(
            fields
                .values()
                .map(|f| (f.name.clone(), Schema::of_type(f.declared_type.clone())))
                .collect(),
        ),
        None => Schema::opaque_object(),
    }
}

fn crud_operation(route: &RouteDefinition) -> Operation {
    let model_ref = Schema::reference(&route.model_name);
    let success = match route.method {
        CrudMethod::List => ResponseEntry::with_json(route.success_description(), Schema::array_of(model_ref.clone())),
        _ => ResponseEntry::described(route.success_description()),
    };

    let mut responses = BTreeMap::from([
        (route.method.success_status().as_u16().to_string(), success),
        ("401".to_string(), ResponseEntry::described("Missing credential")),
        ("403".to_string(), ResponseEntry::described("Invalid or expired credential")),
    ]);
    if route.method == CrudMethod::Get {
        responses.insert(
            "404".into(),
            ResponseEntry::described(format!("{} not found", route.model_name)),
        );
    }

    Operation {
        tags: vec![route.model_name.clone()],
        summary: route.summary(),
        operation_id: route.operation_id(),
        parameters: if route.method.has_id() {
            vec![Parameter::path("id")]
        } else {
            Vec::new()
        },
        request_body: route.method.has_body().then(|| RequestBody::json(model_ref)),
        responses,
        security: vec![
            SecurityRequirement::from([(COOKIE_SCHEME.to_string(), Vec::new())]),
            SecurityRequirement::from([(BEARER_SCHEME.to_string(), Vec::new())]),
        ],
    }
}

fn login_operation() -> Operation {
    Operation {
        tags: vec!["Auth".into()],
        summary: "Login to get a token".into(),
        operation_id: "login".into(),
        parameters: Vec::new(),
        request_body: Some(RequestBody::json(Schema::reference(LOGIN_SCHEMA))),
        responses: BTreeMap::from([
            ("200".to_string(), ResponseEntry::described("Successful login")),
            ("401".to_string(), ResponseEntry::described("Invalid credentials")),
        ]),
        security: Vec::new(),
    }
}
