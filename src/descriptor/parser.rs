//! Declaration grammar over the token stream:
//!
//! ```text
//! declaration := ["readonly"] ident ["?"] ":" type-ident ";"
//! ```
//!
//! Any text between declarations is ignored. A declaration whose type is not a single identifier
//! (dotted path, generic, array, union, inline object) contributes no field and is reported in
//! [`ParsedFields::skipped`].

use super::lexer::{tokenize, Token};
use super::{FieldDescriptor, FieldMap};

/// A `name:` that did not complete as a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedDeclaration {
    pub name: String,
    pub reason: &'static str,
}

/// Result of scanning one descriptor source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub fields: FieldMap,
    pub skipped: Vec<SkippedDeclaration>,
}

impl ParsedFields {
    /// No declaration matched anywhere in the text.
    pub fn is_miss(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Field mapping of `source`; empty when nothing matches.
pub fn parse(source: &str) -> FieldMap {
    parse_fields(source).fields
}

/// Scan `source` for declarations. Never fails; worst case the result is empty.
pub fn parse_fields(source: &str) -> ParsedFields {
    let tokens = tokenize(source);
    let mut out = ParsedFields::default();
    let mut i = 0;

    while i < tokens.len() {
        match declaration_at(&tokens, i) {
            Step::Field { field, next } => {
                out.fields.insert(field.name.clone(), field);
                i = next;
            }
            Step::Skipped { skipped, next } => {
                tracing::trace!(field = %skipped.name, reason = skipped.reason, "declaration skipped");
                out.skipped.push(skipped);
                i = next;
            }
            Step::NoMatch => i += 1,
        }
    }
    out
}

enum Step {
    Field { field: FieldDescriptor, next: usize },
    Skipped { skipped: SkippedDeclaration, next: usize },
    NoMatch,
}

fn declaration_at(tokens: &[Token<'_>], start: usize) -> Step {
    let mut i = start;
    if let (Some(Token::Ident("readonly")), Some(Token::Ident(_))) = (tokens.get(i), tokens.get(i + 1)) {
        i += 1;
    }

    let name = match tokens.get(i) {
        Some(Token::Ident(name)) => *name,
        _ => return Step::NoMatch,
    };
    i += 1;

    let optional = matches!(tokens.get(i), Some(Token::Question));
    if optional {
        i += 1;
    }
    if !matches!(tokens.get(i), Some(Token::Colon)) {
        return Step::NoMatch;
    }
    i += 1;

    match (tokens.get(i), tokens.get(i + 1)) {
        (Some(Token::Ident(ty)), Some(Token::Semicolon)) => Step::Field {
            field: FieldDescriptor {
                name: name.to_string(),
                declared_type: ty.to_string(),
                optional,
            },
            next: i + 2,
        },
        (Some(Token::Other('{')), _) => Step::Skipped {
            skipped: SkippedDeclaration {
                name: name.to_string(),
                reason: "inline object type",
            },
            next: past_closing_brace(tokens, i),
        },
        (Some(Token::Ident(_)), _) => Step::Skipped {
            skipped: SkippedDeclaration {
                name: name.to_string(),
                reason: "type is not a single identifier",
            },
            next: start + 1,
        },
        _ => Step::Skipped {
            skipped: SkippedDeclaration {
                name: name.to_string(),
                reason: "missing type",
            },
            next: start + 1,
        },
    }
}

/// Index just past the brace that closes the one at `open`, or the end of input.
fn past_closing_brace(tokens: &[Token<'_>], open: usize) -> usize {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::Other('{') => depth += 1,
            Token::Other('}') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return idx + 1;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(map: &FieldMap) -> Vec<(&str, &str)> {
        map.values()
            .map(|f| (f.name.as_str(), f.declared_type.as_str()))
            .collect()
    }

    #[test]
    fn extracts_interface_fields() {
        let src = r#"
import { Types } from "mongoose";

export interface IPostDTO {
  title: string;
  content: string;
  author: Types.ObjectId;
}
"#;
        let parsed = parse_fields(src);
        assert_eq!(types(&parsed.fields), vec![("content", "string"), ("title", "string")]);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].name, "author");
    }

    #[test]
    fn duplicate_name_keeps_last_type() {
        let fields = parse("a: string; b: number; a: boolean;");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["a"].declared_type, "boolean");
    }

    #[test]
    fn distinct_names_counted() {
        let fields = parse("x:number;y :number ;\n z\t:\tDate;");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["z"].declared_type, "Date");
    }

    #[test]
    fn no_match_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse("just some words, no declarations").is_empty());
        assert!(parse_fields("}{;:?::;;").is_miss());
    }

    #[test]
    fn garbage_never_panics() {
        let inputs = ["::::", "a:", "a: ", "a:b", ";;;a", "\u{0}\u{ffff}: x;", "readonly", "/*", "a?:"];
        for input in inputs {
            let _ = parse_fields(input);
        }
    }

    #[test]
    fn optional_marker_recorded() {
        let fields = parse("nickname?: string;");
        assert!(fields["nickname"].optional);
        assert_eq!(fields["nickname"].declared_type, "string");
    }

    #[test]
    fn readonly_modifier_accepted() {
        let fields = parse("readonly id: string; readonly: boolean;");
        assert_eq!(fields["id"].declared_type, "string");
        assert_eq!(fields["readonly"].declared_type, "boolean");
    }

    #[test]
    fn inline_object_type_skipped_whole() {
        let parsed = parse_fields("pos: { x: number; y: number }; label: string;");
        assert_eq!(types(&parsed.fields), vec![("label", "string")]);
        assert_eq!(parsed.skipped[0].reason, "inline object type");
    }

    #[test]
    fn generic_and_array_types_skipped() {
        let parsed = parse_fields("tags: Array<string>; ids: string[]; name: string;");
        assert_eq!(types(&parsed.fields), vec![("name", "string")]);
        assert_eq!(parsed.skipped.len(), 2);
    }

    #[test]
    fn comment_marker_in_string_does_not_hide_fields() {
        let fields = parse("const glob = \"src/*.ts\";\ntitle: string;\ncontent: string;");
        assert_eq!(types(&fields), vec![("content", "string"), ("title", "string")]);
    }

    #[test]
    fn unterminated_block_comment_keeps_later_fields() {
        let fields = parse("/* header never closed\ntitle: string;\nbody: string;");
        assert_eq!(types(&fields), vec![("body", "string"), ("title", "string")]);
    }
}
