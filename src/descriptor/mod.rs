//! Field descriptors: the named, typed fields extracted from a model's declaration text.

pub mod lexer;
pub mod parser;

pub use parser::{parse, parse_fields, ParsedFields, SkippedDeclaration};

use serde::Serialize;
use std::collections::BTreeMap;

/// One declared field. `declared_type` is a free-form label carried verbatim into the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub declared_type: String,
    /// Declared with a `?` marker (`name?: string;`).
    pub optional: bool,
}

/// Fields keyed by name. Keys are unique per model; a later declaration replaces an earlier one.
pub type FieldMap = BTreeMap<String, FieldDescriptor>;
