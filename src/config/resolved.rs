//! Model registry: model names resolved against their descriptor sources. Built once, read-only after.

use crate::config::sources::{DescriptorSource, ModelNameSource};
use crate::config::validator::{path_segment, validate_model_names};
use crate::descriptor::{parse_fields, FieldMap};
use crate::error::ConfigError;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelDefinition {
    pub name: String,
    /// `None` when no descriptor source exists for this model; the document falls back to an opaque schema.
    pub fields: Option<FieldMap>,
}

impl ModelDefinition {
    pub fn new(name: impl Into<String>, fields: Option<FieldMap>) -> Self {
        ModelDefinition {
            name: name.into(),
            fields,
        }
    }

    /// Lower-cased name used as the first path segment of every generated route.
    pub fn path_segment(&self) -> String {
        path_segment(&self.name)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    models: Vec<ModelDefinition>,
    by_segment: HashMap<String, usize>,
}

impl ModelRegistry {
    /// Resolve every name against `source`, in input order.
    pub fn build(names: &[String], source: &dyn DescriptorSource) -> Result<Self, ConfigError> {
        validate_model_names(names)?;

        let mut models = Vec::with_capacity(names.len());
        let mut by_segment = HashMap::with_capacity(names.len());
        for name in names {
            let fields = match source.descriptor_for(name) {
                Some(text) => {
                    let parsed = parse_fields(&text);
                    if parsed.is_miss() {
                        tracing::debug!(model = %name, "descriptor has no field declarations");
                    }
                    for skipped in &parsed.skipped {
                        tracing::debug!(model = %name, field = %skipped.name, reason = skipped.reason, "field skipped");
                    }
                    Some(parsed.fields)
                }
                None => {
                    tracing::info!(model = %name, "no descriptor found, schema will be opaque");
                    None
                }
            };
            by_segment.insert(path_segment(name), models.len());
            models.push(ModelDefinition::new(name.clone(), fields));
        }

        Ok(ModelRegistry { models, by_segment })
    }

    /// List names from `names`, then [`ModelRegistry::build`]. Fails if the name source cannot be resolved.
    pub fn load(names: &dyn ModelNameSource, descriptors: &dyn DescriptorSource) -> Result<Self, ConfigError> {
        let names = names.list_model_names()?;
        Self::build(&names, descriptors)
    }

    pub fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    pub fn by_path(&self, segment: &str) -> Option<&ModelDefinition> {
        self.by_segment.get(segment).map(|&idx| &self.models[idx])
    }

    pub fn get(&self, name: &str) -> Option<&ModelDefinition> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sources::{StaticDescriptors, StaticModelNames};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_present_and_marks_absent() {
        let source = StaticDescriptors::default().with("Post", "title: string; content: string;");
        let registry = ModelRegistry::build(&names(&["Post", "User"]), &source).unwrap();

        let post = registry.get("Post").unwrap();
        let fields = post.fields.as_ref().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["title"].declared_type, "string");
        assert_eq!(registry.get("User").unwrap().fields, None);
    }

    #[test]
    fn preserves_input_order() {
        let source = StaticDescriptors::default();
        let registry = ModelRegistry::build(&names(&["Zebra", "Apple", "Mango"]), &source).unwrap();
        let order: Vec<&str> = registry.models().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(order, vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let source = StaticDescriptors::default().with("Post", "a: b; c: d;");
        let list = names(&["Post", "User"]);
        let first = ModelRegistry::build(&list, &source).unwrap();
        let second = ModelRegistry::build(&list, &source).unwrap();
        assert_eq!(first.models(), second.models());
    }

    #[test]
    fn descriptor_without_declarations_is_empty_not_absent() {
        let source = StaticDescriptors::default().with("Post", "nothing here");
        let registry = ModelRegistry::build(&names(&["Post"]), &source).unwrap();
        assert_eq!(registry.get("Post").unwrap().fields, Some(FieldMap::new()));
    }

    #[test]
    fn lookup_by_lowercased_segment() {
        let registry = ModelRegistry::build(&names(&["BlogPost"]), &StaticDescriptors::default()).unwrap();
        assert_eq!(registry.by_path("blogpost").map(|m| m.name.as_str()), Some("BlogPost"));
        assert!(registry.by_path("BlogPost").is_none());
    }

    #[test]
    fn load_uses_name_source() {
        let names = StaticModelNames(vec!["Post".into()]);
        let registry = ModelRegistry::load(&names, &StaticDescriptors::default()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_segments_rejected() {
        let err = ModelRegistry::build(&names(&["Post", "post"]), &StaticDescriptors::default()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePathSegment(_)));
    }

    #[test]
    fn wildcard_name_rejected_before_routing() {
        let err = ModelRegistry::build(&names(&["Post", "*all"]), &StaticDescriptors::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidModelName(n) if n == "*all"));
    }
}
