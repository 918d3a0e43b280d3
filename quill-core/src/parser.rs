use crate::ast::AstNode;
use crate::error::CoreError;
use crate::lexer::{Token, TokenKind, lex};

/// Parse a Quill module into its AST.
///
/// Statements chain through `left` with the newest statement as the
/// root, so a depth-first traversal of the result visits them in
/// source order. An empty module parses to `None`.
pub fn parse_module(source: &str) -> Result<Option<AstNode>, CoreError> {
    let tokens = lex(source)?;
    let mut root: Option<AstNode> = None;
    let mut position = 0;

    while position < tokens.len() {
        if matches!(tokens[position].kind, TokenKind::Newline) {
            position += 1;
            continue;
        }
        let statement = parse_statement(&tokens, &mut position)?;
        root = Some(match root.take() {
            Some(previous) => statement.chained_onto(previous),
            None => statement,
        });
    }

    Ok(root)
}

fn parse_statement(tokens: &[Token], position: &mut usize) -> Result<AstNode, CoreError> {
    let token = &tokens[*position];
    *position += 1;
    match &token.kind {
        TokenKind::Ident(name) if name == "print" => {
            let argument = tokens.get(*position).ok_or_else(|| {
                CoreError::ParseError("expected a string literal after 'print'".to_string())
            })?;
            *position += 1;
            match &argument.kind {
                TokenKind::StringLiteral(value) => {
                    expect_statement_end(tokens, position)?;
                    Ok(AstNode::print_string(value.clone()))
                }
                _ => Err(CoreError::ParseError(
                    "expected a string literal after 'print'".to_string(),
                )),
            }
        }
        TokenKind::Ident(name) => Err(CoreError::ParseError(format!(
            "unknown statement '{name}'"
        ))),
        TokenKind::StringLiteral(_) => Err(CoreError::ParseError(
            "a statement cannot start with a string literal".to_string(),
        )),
        TokenKind::Newline => Err(CoreError::ParseError("expected a statement".to_string())),
    }
}

fn expect_statement_end(tokens: &[Token], position: &mut usize) -> Result<(), CoreError> {
    match tokens.get(*position) {
        None => Ok(()),
        Some(token) if matches!(token.kind, TokenKind::Newline) => {
            *position += 1;
            Ok(())
        }
        Some(_) => Err(CoreError::ParseError(
            "expected end of statement".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    #[test]
    fn parses_single_print_statement() {
        let root = parse_module("print \"hello\"\n")
            .expect("parse")
            .expect("non-empty module");
        assert_eq!(
            root.kind,
            NodeKind::PrintString {
                value: "hello".to_string()
            }
        );
        assert!(root.left.is_none());
    }

    #[test]
    fn chains_statements_through_left_with_newest_as_root() {
        let root = parse_module("print \"a\"\nprint \"b\"\nprint \"c\"\n")
            .expect("parse")
            .expect("non-empty module");
        assert_eq!(
            root.kind,
            NodeKind::PrintString {
                value: "c".to_string()
            }
        );
        let middle = root.left.as_deref().expect("chained statement");
        assert_eq!(
            middle.kind,
            NodeKind::PrintString {
                value: "b".to_string()
            }
        );
        let first = middle.left.as_deref().expect("chained statement");
        assert_eq!(
            first.kind,
            NodeKind::PrintString {
                value: "a".to_string()
            }
        );
        assert!(first.left.is_none());
    }

    #[test]
    fn empty_module_parses_to_none() {
        assert_eq!(parse_module("").expect("parse"), None);
        assert_eq!(parse_module("\n\n# only comments\n").expect("parse"), None);
    }

    #[test]
    fn rejects_unknown_statement() {
        let err = parse_module("shout \"hello\"\n").unwrap_err();
        assert!(matches!(err, CoreError::ParseError(_)));
        assert!(err.to_string().contains("unknown statement 'shout'"));
    }

    #[test]
    fn rejects_print_without_literal() {
        let err = parse_module("print\n").unwrap_err();
        assert!(matches!(err, CoreError::ParseError(_)));
    }

    #[test]
    fn rejects_trailing_tokens_after_statement() {
        let err = parse_module("print \"a\" print \"b\"\n").unwrap_err();
        assert!(matches!(err, CoreError::ParseError(_)));
    }
}
