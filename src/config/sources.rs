//! Startup collaborators: where model names and descriptor text come from.

use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Ordered set of model names from an external schema source.
pub trait ModelNameSource {
    fn list_model_names(&self) -> Result<Vec<String>, ConfigError>;
}

/// Raw declaration text for a model, or `None` when no descriptor exists for it.
pub trait DescriptorSource {
    fn descriptor_for(&self, model_name: &str) -> Option<String>;
}

/// Top-level keys of a parsed schema JSON object, e.g. `schema/schema.parsed.json`.
#[derive(Clone, Debug)]
pub struct SchemaFile {
    path: PathBuf,
}

impl SchemaFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SchemaFile { path: path.into() }
    }
}

impl ModelNameSource for SchemaFile {
    fn list_model_names(&self) -> Result<Vec<String>, ConfigError> {
        let missing = |reason: String| ConfigError::StartupConfigMissing {
            path: self.path.display().to_string(),
            reason,
        };
        let raw = std::fs::read_to_string(&self.path).map_err(|e| missing(e.to_string()))?;
        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| missing(e.to_string()))?;
        match value {
            serde_json::Value::Object(map) => Ok(map.keys().cloned().collect()),
            _ => Err(missing("top-level value must be a JSON object".into())),
        }
    }
}

/// Fixed list of model names (tests, embedded configurations).
#[derive(Clone, Debug, Default)]
pub struct StaticModelNames(pub Vec<String>);

impl ModelNameSource for StaticModelNames {
    fn list_model_names(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.0.clone())
    }
}

/// Directory of `{Model}.dto.ts` files.
#[derive(Clone, Debug)]
pub struct DtoDirectory {
    dir: PathBuf,
}

impl DtoDirectory {
    pub const SUFFIX: &'static str = ".dto.ts";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DtoDirectory { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, model_name: &str) -> PathBuf {
        self.dir.join(format!("{}{}", model_name, Self::SUFFIX))
    }
}

impl DescriptorSource for DtoDirectory {
    fn descriptor_for(&self, model_name: &str) -> Option<String> {
        let path = self.file_for(model_name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "descriptor unreadable, treating as absent");
                None
            }
        }
    }
}

/// In-memory descriptor text keyed by model name.
#[derive(Clone, Debug, Default)]
pub struct StaticDescriptors(pub HashMap<String, String>);

impl StaticDescriptors {
    pub fn with(mut self, model_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(model_name.into(), text.into());
        self
    }
}

impl DescriptorSource for StaticDescriptors {
    fn descriptor_for(&self, model_name: &str) -> Option<String> {
        self.0.get(model_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("api-scaffold-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn schema_file_lists_keys() {
        let dir = scratch_dir("schema");
        let path = dir.join("schema.parsed.json");
        std::fs::write(&path, r#"{"User": {}, "Post": {"fields": []}}"#).unwrap();
        let mut names = SchemaFile::new(&path).list_model_names().unwrap();
        names.sort();
        assert_eq!(names, vec!["Post", "User"]);
    }

    #[test]
    fn missing_schema_file_is_startup_error() {
        let err = SchemaFile::new("/nonexistent/schema.parsed.json").list_model_names().unwrap_err();
        assert!(matches!(err, ConfigError::StartupConfigMissing { .. }));
    }

    #[test]
    fn non_object_schema_is_startup_error() {
        let dir = scratch_dir("array-schema");
        let path = dir.join("schema.parsed.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            SchemaFile::new(&path).list_model_names(),
            Err(ConfigError::StartupConfigMissing { .. })
        ));
    }

    #[test]
    fn dto_directory_reads_matching_file() {
        let dir = scratch_dir("dto");
        std::fs::write(dir.join("Post.dto.ts"), "title: string;").unwrap();
        let source = DtoDirectory::new(&dir);
        assert_eq!(source.descriptor_for("Post").as_deref(), Some("title: string;"));
        assert_eq!(source.descriptor_for("User"), None);
    }

    #[test]
    fn missing_dto_directory_yields_absent() {
        assert_eq!(DtoDirectory::new("/nonexistent/dto").descriptor_for("Post"), None);
    }
}
