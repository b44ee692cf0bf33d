//! Record storage behind the generated CRUD routes. The default [`EchoStore`] is a scaffold: it
//! returns synthetic rows and echoes request bodies without persisting anything.

use crate::config::ModelDefinition;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::{json, Map, Value};

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, model: &ModelDefinition) -> Result<Vec<Value>, AppError>;

    async fn create(&self, model: &ModelDefinition, body: Map<String, Value>) -> Result<Value, AppError>;

    /// `None` when no record has this id.
    async fn read(&self, model: &ModelDefinition, id: &str) -> Result<Option<Value>, AppError>;

    async fn update(&self, model: &ModelDefinition, id: &str, body: Map<String, Value>) -> Result<Option<Value>, AppError>;

    async fn delete(&self, model: &ModelDefinition, id: &str) -> Result<Value, AppError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EchoStore;

impl EchoStore {
    fn example_name(model: &ModelDefinition) -> String {
        format!("{} Example", model.name)
    }
}

#[async_trait]
impl RecordStore for EchoStore {
    async fn list(&self, model: &ModelDefinition) -> Result<Vec<Value>, AppError> {
        Ok(vec![json!({ "id": 1, "name": Self::example_name(model) })])
    }

    async fn create(&self, _model: &ModelDefinition, body: Map<String, Value>) -> Result<Value, AppError> {
        Ok(Value::Object(body))
    }

    async fn read(&self, model: &ModelDefinition, id: &str) -> Result<Option<Value>, AppError> {
        Ok(Some(json!({ "id": id, "name": Self::example_name(model) })))
    }

    async fn update(&self, _model: &ModelDefinition, id: &str, body: Map<String, Value>) -> Result<Option<Value>, AppError> {
        let mut out = Map::with_capacity(body.len() + 1);
        out.insert("id".into(), Value::String(id.to_string()));
        // body keys win over the path id, matching `{ id, ...body }`
        out.extend(body);
        Ok(Some(Value::Object(out)))
    }

    async fn delete(&self, model: &ModelDefinition, id: &str) -> Result<Value, AppError> {
        Ok(json!({ "id": id, "message": format!("{} deleted", model.name) }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> ModelDefinition {
        ModelDefinition::new("Post", None)
    }

    #[tokio::test]
    async fn list_returns_example_row() {
        let rows = EchoStore.list(&post()).await.unwrap();
        assert_eq!(rows, vec![json!({"id": 1, "name": "Post Example"})]);
    }

    #[tokio::test]
    async fn update_merges_body_over_id() {
        let body = json!({"title": "t", "id": "other"}).as_object().cloned().unwrap();
        let row = EchoStore.update(&post(), "7", body).await.unwrap().unwrap();
        assert_eq!(row, json!({"id": "other", "title": "t"}));
    }

    #[tokio::test]
    async fn delete_reports_model() {
        let row = EchoStore.delete(&post(), "7").await.unwrap();
        assert_eq!(row["message"], "Post deleted");
    }
}
