//! OpenAPI 3.0 document model. Maps are sorted so serialization is deterministic.

use axum::http::Method;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::openapi::info::Info;
use utoipa::openapi::server::Server;

pub const OPENAPI_VERSION: &str = "3.0.0";
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Security requirement: scheme name -> scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiDocument {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: BTreeMap<String, PathItem>,
    pub components: Components,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

impl PathItem {
    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        match method.as_str() {
            "GET" => self.get.as_ref(),
            "POST" => self.post.as_ref(),
            "PUT" => self.put.as_ref(),
            "DELETE" => self.delete.as_ref(),
            _ => None,
        }
    }

    /// Store `op` under `method`. Returns the operation it replaced, if any.
    pub fn set(&mut self, method: &Method, op: Operation) -> Option<Operation> {
        let slot = match method.as_str() {
            "GET" => &mut self.get,
            "POST" => &mut self.post,
            "PUT" => &mut self.put,
            "DELETE" => &mut self.delete,
            _ => return Some(op),
        };
        slot.replace(op)
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        [&self.get, &self.post, &self.put, &self.delete]
            .into_iter()
            .filter_map(Option::as_ref)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub tags: Vec<String>,
    pub summary: String,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, ResponseEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    pub schema: Schema,
}

impl Parameter {
    /// Required string path parameter.
    pub fn path(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            location: "path".into(),
            required: true,
            schema: Schema::of_type("string"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestBody {
    pub required: bool,
    pub content: BTreeMap<String, MediaType>,
}

impl RequestBody {
    pub fn json(schema: Schema) -> Self {
        RequestBody {
            required: true,
            content: json_content(schema),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Schema,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseEntry {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
}

impl ResponseEntry {
    pub fn described(description: impl Into<String>) -> Self {
        ResponseEntry {
            description: description.into(),
            content: None,
        }
    }

    pub fn with_json(description: impl Into<String>, schema: Schema) -> Self {
        ResponseEntry {
            description: description.into(),
            content: Some(json_content(schema)),
        }
    }
}

fn json_content(schema: Schema) -> BTreeMap<String, MediaType> {
    BTreeMap::from([(JSON_MEDIA_TYPE.to_string(), MediaType { schema })])
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Schema {
    Ref(Reference),
    Object(SchemaObject),
}

impl Schema {
    pub fn reference(component: &str) -> Self {
        Schema::Ref(Reference {
            reference: format!("{}{}", Reference::SCHEMA_PREFIX, component),
        })
    }

    /// `{ "type": <label> }`. The label is emitted verbatim.
    pub fn of_type(label: impl Into<String>) -> Self {
        Schema::Object(SchemaObject {
            schema_type: label.into(),
            properties: None,
            items: None,
        })
    }

    /// Untyped object marker used when a model has no field descriptors.
    pub fn opaque_object() -> Self {
        Schema::of_type("object")
    }

    pub fn object(properties: BTreeMap<String, Schema>) -> Self {
        Schema::Object(SchemaObject {
            schema_type: "object".into(),
            properties: Some(properties),
            items: None,
        })
    }

    pub fn array_of(items: Schema) -> Self {
        Schema::Object(SchemaObject {
            schema_type: "array".into(),
            properties: None,
            items: Some(Box::new(items)),
        })
    }

    fn collect_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Schema::Ref(r) => out.push(&r.reference),
            Schema::Object(obj) => {
                for prop in obj.properties.iter().flat_map(|p| p.values()) {
                    prop.collect_refs(out);
                }
                if let Some(items) = &obj.items {
                    items.collect_refs(out);
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl Reference {
    pub const SCHEMA_PREFIX: &'static str = "#/components/schemas/";

    /// Component name when this points into `components.schemas`.
    pub fn schema_name(&self) -> Option<&str> {
        self.reference.strip_prefix(Self::SCHEMA_PREFIX)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SchemaObject {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    pub schemas: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
}

impl SecurityScheme {
    pub fn cookie(name: impl Into<String>) -> Self {
        SecurityScheme {
            scheme_type: "apiKey".into(),
            location: Some("cookie".into()),
            name: Some(name.into()),
            scheme: None,
            bearer_format: None,
        }
    }

    pub fn bearer_jwt() -> Self {
        SecurityScheme {
            scheme_type: "http".into(),
            location: None,
            name: None,
            scheme: Some("bearer".into()),
            bearer_format: Some("JWT".into()),
        }
    }
}

impl ApiDocument {
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.paths
            .iter()
            .flat_map(|(path, item)| item.operations().map(move |op| (path.as_str(), op)))
    }

    pub fn operation(&self, path: &str, method: &Method) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }

    /// Every `$ref` in paths and component schemas.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for (_, op) in self.operations() {
            for param in &op.parameters {
                param.schema.collect_refs(&mut out);
            }
            let bodies = op.request_body.iter().map(|b| &b.content);
            let responses = op.responses.values().filter_map(|r| r.content.as_ref());
            for content in bodies.chain(responses) {
                for media in content.values() {
                    media.schema.collect_refs(&mut out);
                }
            }
        }
        for schema in self.components.schemas.values() {
            schema.collect_refs(&mut out);
        }
        out
    }

    /// References that do not resolve to a key of `components.schemas`.
    pub fn dangling_references(&self) -> Vec<&str> {
        self.references()
            .into_iter()
            .filter(|r| {
                r.strip_prefix(Reference::SCHEMA_PREFIX)
                    .map_or(true, |name| !self.components.schemas.contains_key(name))
            })
            .collect()
    }
}
