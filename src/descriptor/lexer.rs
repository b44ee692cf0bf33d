//! Tokenizer for declaration text. Total over any input: unknown characters become `Other`.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Ident(&'a str),
    /// A quoted string literal, quotes included. Never part of a declaration.
    Literal(&'a str),
    Colon,
    Semicolon,
    Question,
    Other(char),
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

/// Byte offset just past the `*/` that closes a block comment opened at `start`.
fn block_comment_end(source: &str, start: usize) -> Option<usize> {
    source[start + 2..].find("*/").map(|rel| start + 2 + rel + 2)
}

/// Byte offset just past the quote closing the literal opened at `start`.
/// `"` and `'` literals end at a newline; template literals may span lines.
fn literal_end(source: &str, start: usize, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in source[start + 1..].char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '\n' if quote != '`' => return None,
            c if c == quote => return Some(start + 1 + idx + 1),
            _ => {}
        }
    }
    None
}

/// Split `source` into tokens, dropping whitespace and `//` / `/* */` comments.
///
/// Comment markers inside string literals are ignored. An unterminated block
/// comment or literal is read as plain text.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    // Everything before this offset has already been consumed by a comment or literal.
    let mut resume = 0usize;

    while let Some((start, c)) = chars.next() {
        if start < resume {
            continue;
        }
        match c {
            c if c.is_whitespace() => {}
            ':' => tokens.push(Token::Colon),
            ';' => tokens.push(Token::Semicolon),
            '?' => tokens.push(Token::Question),
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                for (_, next) in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => match block_comment_end(source, start) {
                Some(end) => resume = end,
                None => tokens.push(Token::Other('/')),
            },
            q if is_quote(q) => match literal_end(source, start, q) {
                Some(end) => {
                    tokens.push(Token::Literal(&source[start..end]));
                    resume = end;
                }
                None => tokens.push(Token::Other(q)),
            },
            c if is_ident_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(idx, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    end = idx + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Ident(&source[start..end]));
            }
            other => tokens.push(Token::Other(other)),
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_declaration() {
        assert_eq!(
            tokenize("title : string;"),
            vec![Token::Ident("title"), Token::Colon, Token::Ident("string"), Token::Semicolon]
        );
    }

    #[test]
    fn drops_comments() {
        let tokens = tokenize("// a: b;\n/* c: d; */ e?: f;");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("e"),
                Token::Question,
                Token::Colon,
                Token::Ident("f"),
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn unterminated_block_comment_is_text() {
        assert_eq!(
            tokenize("/* a: b;"),
            vec![
                Token::Other('/'),
                Token::Other('*'),
                Token::Ident("a"),
                Token::Colon,
                Token::Ident("b"),
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn comment_markers_inside_literals_ignored() {
        assert_eq!(
            tokenize(r#"x = "src/*.ts"; y = '//'; z = `a/*b`;"#),
            vec![
                Token::Ident("x"),
                Token::Other('='),
                Token::Literal("\"src/*.ts\""),
                Token::Semicolon,
                Token::Ident("y"),
                Token::Other('='),
                Token::Literal("'//'"),
                Token::Semicolon,
                Token::Ident("z"),
                Token::Other('='),
                Token::Literal("`a/*b`"),
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn escaped_quote_stays_inside_literal() {
        assert_eq!(
            tokenize(r#""a\"b: c;" d"#),
            vec![Token::Literal(r#""a\"b: c;""#), Token::Ident("d")]
        );
    }

    #[test]
    fn unterminated_literal_is_text() {
        assert_eq!(
            tokenize("it's\nname: string;"),
            vec![
                Token::Ident("it"),
                Token::Other('\''),
                Token::Ident("s"),
                Token::Ident("name"),
                Token::Colon,
                Token::Ident("string"),
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn non_ascii_is_other() {
        assert_eq!(tokenize("é"), vec![Token::Other('é')]);
    }
}
