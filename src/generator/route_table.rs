//! Five CRUD routes per model, derived from the model name alone.

use crate::config::ModelDefinition;
use axum::http::{Method, StatusCode};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrudMethod {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl CrudMethod {
    pub const ALL: [CrudMethod; 5] = [
        CrudMethod::List,
        CrudMethod::Create,
        CrudMethod::Get,
        CrudMethod::Update,
        CrudMethod::Delete,
    ];

    pub fn http_method(self) -> Method {
        match self {
            CrudMethod::List | CrudMethod::Get => Method::GET,
            CrudMethod::Create => Method::POST,
            CrudMethod::Update => Method::PUT,
            CrudMethod::Delete => Method::DELETE,
        }
    }

    /// Item routes carry the `{id}` path parameter.
    pub fn has_id(self) -> bool {
        matches!(self, CrudMethod::Get | CrudMethod::Update | CrudMethod::Delete)
    }

    pub fn has_body(self) -> bool {
        matches!(self, CrudMethod::Create | CrudMethod::Update)
    }

    pub fn success_status(self) -> StatusCode {
        match self {
            CrudMethod::Create => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            CrudMethod::List => "list",
            CrudMethod::Create => "create",
            CrudMethod::Get => "get",
            CrudMethod::Update => "update",
            CrudMethod::Delete => "delete",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteDefinition {
    /// OpenAPI path template, e.g. `/post/{id}`.
    pub path: String,
    pub method: CrudMethod,
    pub model_name: String,
}

impl RouteDefinition {
    /// Route pattern in axum's syntax (`/post/:id`).
    pub fn axum_path(&self) -> String {
        self.path.replace("{id}", ":id")
    }

    pub fn http_method(&self) -> Method {
        self.method.http_method()
    }

    /// e.g. `listPost`, `updatePost`.
    pub fn operation_id(&self) -> String {
        format!("{}{}", self.method.verb(), self.model_name)
    }

    pub fn summary(&self) -> String {
        let m = &self.model_name;
        match self.method {
            CrudMethod::List => format!("Get all {}s", m),
            CrudMethod::Create => format!("Create a {}", m),
            CrudMethod::Get => format!("Get a {} by ID", m),
            CrudMethod::Update => format!("Update a {} by ID", m),
            CrudMethod::Delete => format!("Delete a {}", m),
        }
    }

    /// Description of the success response.
    pub fn success_description(&self) -> String {
        let m = &self.model_name;
        match self.method {
            CrudMethod::List => format!("List of {}s", m),
            CrudMethod::Create => format!("{} created", m),
            CrudMethod::Get => format!("{} data", m),
            CrudMethod::Update => format!("{} updated", m),
            CrudMethod::Delete => format!("{} deleted", m),
        }
    }
}

/// The route table for one model. Field descriptors do not affect it.
pub fn routes_for(model: &ModelDefinition) -> [RouteDefinition; 5] {
    let collection = format!("/{}", model.path_segment());
    let item = format!("{}/{{id}}", collection);
    CrudMethod::ALL.map(|method| RouteDefinition {
        path: if method.has_id() { item.clone() } else { collection.clone() },
        method,
        model_name: model.name.clone(),
    })
}

/// Route tables of all models, in model order.
pub fn route_table(models: &[ModelDefinition]) -> Vec<RouteDefinition> {
    models.iter().flat_map(routes_for).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn model(name: &str) -> ModelDefinition {
        ModelDefinition::new(name, None)
    }

    fn table(routes: &[RouteDefinition]) -> Vec<(Method, String)> {
        routes.iter().map(|r| (r.http_method(), r.path.clone())).collect()
    }

    #[test]
    fn five_routes_with_fixed_templates() {
        let routes = routes_for(&model("Post"));
        assert_eq!(
            table(&routes),
            vec![
                (Method::GET, "/post".to_string()),
                (Method::POST, "/post".to_string()),
                (Method::GET, "/post/{id}".to_string()),
                (Method::PUT, "/post/{id}".to_string()),
                (Method::DELETE, "/post/{id}".to_string()),
            ]
        );
        assert!(routes.iter().all(|r| r.model_name == "Post"));
    }

    #[test]
    fn paths_are_lowercased_regardless_of_casing() {
        for name in ["USER", "User", "uSeR"] {
            let routes = routes_for(&model(name));
            assert!(routes.iter().all(|r| r.path.starts_with("/user")));
        }
    }

    #[test]
    fn fields_do_not_change_routes() {
        let with_fields = ModelDefinition::new("Post", Some(crate::descriptor::parse("a: string;")));
        assert_eq!(table(&routes_for(&with_fields)), table(&routes_for(&model("Post"))));
    }

    #[test]
    fn path_and_method_unique_across_table() {
        let models = vec![model("Post"), model("User"), model("Comment")];
        let routes = route_table(&models);
        assert_eq!(routes.len(), 15);
        let unique: HashSet<(Method, String)> = table(&routes).into_iter().collect();
        assert_eq!(unique.len(), 15);
    }

    #[test]
    fn axum_path_and_operation_ids() {
        let routes = routes_for(&model("Post"));
        assert_eq!(routes[3].axum_path(), "/post/:id");
        assert_eq!(routes[3].operation_id(), "updatePost");
        assert_eq!(routes[0].summary(), "Get all Posts");
        assert_eq!(routes[1].method.success_status(), StatusCode::CREATED);
    }
}
