//! Model name validation: every name must map to a distinct, routable path segment.

use crate::error::ConfigError;
use std::collections::HashSet;

/// Path segments owned by fixed routes; a model lowering to one of these would shadow it.
pub const RESERVED_SEGMENTS: &[&str] = &["login", "logout", "api-docs", "health", "version"];

/// Lower-cased path segment for a model name.
pub fn path_segment(model_name: &str) -> String {
    model_name.to_lowercase()
}

/// Characters allowed in a model name. Anything else could be read as a route
/// pattern or need escaping in a schema reference.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

pub fn validate_model_names(names: &[String]) -> Result<(), ConfigError> {
    let mut segments = HashSet::new();
    for name in names {
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(ConfigError::InvalidModelName(name.clone()));
        }
        let segment = path_segment(name);
        if RESERVED_SEGMENTS.contains(&segment.as_str()) {
            return Err(ConfigError::ReservedPathSegment(segment));
        }
        if !segments.insert(segment.clone()) {
            return Err(ConfigError::DuplicatePathSegment(segment));
        }
    }
    Ok(())
}
