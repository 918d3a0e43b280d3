//! Lexer for Quill modules.

use crate::error::CoreError;

/// Kind of a token produced by the lexer.
///
/// The lexer is intentionally simple: it recognizes identifiers,
/// string literals and statement separators, and leaves all meaning
/// to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    StringLiteral(String),
    Newline,
}

/// A single token with its byte position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Lex a source string into tokens.
///
/// Whitespace separates tokens, `#` starts a comment running to the
/// end of the line, and newlines are kept as statement separators.
pub fn lex(source: &str) -> Result<Vec<Token>, CoreError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            ' ' | '\t' | '\r' => {}
            '\n' => tokens.push(Token {
                kind: TokenKind::Newline,
                position,
            }),
            '#' => {
                while let Some(&(_, next)) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '"' => {
                let value = lex_string(&mut chars, position)?;
                tokens.push(Token {
                    kind: TokenKind::StringLiteral(value),
                    position,
                });
            }
            _ if ch.is_ascii_alphabetic() || ch == '_' => {
                let mut name = String::new();
                name.push(ch);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(name),
                    position,
                });
            }
            other => {
                return Err(CoreError::LexError {
                    position,
                    message: format!("unexpected character '{other}'"),
                });
            }
        }
    }

    Ok(tokens)
}

fn lex_string(
    chars: &mut core::iter::Peekable<core::str::CharIndices<'_>>,
    start: usize,
) -> Result<String, CoreError> {
    let mut value = String::new();

    while let Some((escape_position, ch)) = chars.next() {
        match ch {
            '"' => return Ok(value),
            '\\' => {
                let (_, escaped) = chars.next().ok_or_else(|| CoreError::LexError {
                    position: start,
                    message: "unterminated string literal".to_string(),
                })?;
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    '\\' => '\\',
                    '"' => '"',
                    other => {
                        return Err(CoreError::LexError {
                            position: escape_position,
                            message: format!("unknown escape '\\{other}'"),
                        });
                    }
                });
            }
            other => value.push(other),
        }
    }

    Err(CoreError::LexError {
        position: start,
        message: "unterminated string literal".to_string(),
    })
}
