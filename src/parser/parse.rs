//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, and coordination
//! - `expressions`: the precedence ladder, one method per grammar level
//!
//! # Implementation
//!
//! The parser borrows a fully lexed token slice that must end in EOF. It is
//! predictive: the cursor only moves forward and never passes the EOF token,
//! so peeking is always in bounds.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Deepest parenthesis nesting the parser descends into
pub const MAX_NESTING: usize = 128;

/// Tallest AST the parser builds; the evaluator and tree view recurse this deep
pub const MAX_TREE_HEIGHT: usize = 512;

/// Recursive descent parser over a borrowed token sequence
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
    /// Open parentheses around the cursor
    pub(crate) nesting: usize,
}

impl<'a> Parser<'a> {
    /// Wrap a token sequence. The last token must be EOF.
    pub fn new(tokens: &'a [Token]) -> Result<Self, ParseError> {
        match tokens.last() {
            Some(token) if token.kind == TokenKind::Eof => Ok(Self {
                tokens,
                position: 0,
                nesting: 0,
            }),
            Some(token) => Err(ParseError {
                message: format!("Token sequence ends with {} instead of end of input", token),
                location: token.location,
            }),
            None => Err(ParseError {
                message: "Empty token sequence".to_string(),
                location: SourceLocation::default(),
            }),
        }
    }

    /// Build the AST for the single expression in the token sequence.
    ///
    /// Only whitespace may follow the expression: `1 2` is an error rather
    /// than evaluating to `1`.
    pub fn generate_ast(&mut self) -> Result<AstNode, ParseError> {
        let root = self.parse_expression()?.node;

        self.consume_blanks();
        if !self.is_at_end() {
            return Err(ParseError {
                message: format!("Unexpected {} after expression", self.peek()),
                location: self.current_location(),
            });
        }

        Ok(root)
    }

    // ===== Helper methods =====

    /// Skip whitespace tokens; they never carry structure.
    pub(crate) fn consume_blanks(&mut self) {
        while self.peek().kind == TokenKind::Space {
            self.advance();
        }
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &'a Token {
        let tokens = self.tokens;
        let token = &tokens[self.position];
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.position]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn expect_token(&mut self, kind: &TokenKind, message: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse(source: &str) -> Result<AstNode, ParseError> {
        let tokens = Lexer::new(source).tokenize().unwrap();
        Parser::new(&tokens)?.generate_ast()
    }

    #[test]
    fn test_parse_literal() {
        let ast = parse("42").unwrap();
        assert!(matches!(ast, AstNode::Literal { value: 42, .. }));
    }

    #[test]
    fn test_rejects_sequence_without_eof() {
        let tokens = vec![Token::new(
            TokenKind::Number("1".to_string()),
            SourceLocation::new(1, 1),
        )];
        assert!(Parser::new(&tokens).is_err());
        assert!(Parser::new(&[]).is_err());
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 3));
        assert!(err.message.contains("number 2"));

        assert!(parse("(1))").is_err());
        assert!(parse("1;").is_err());
    }

    #[test]
    fn test_trailing_whitespace_is_accepted() {
        assert!(parse("1 + 2 \n").is_ok());
    }

    #[test]
    fn test_cursor_stops_at_eof() {
        let tokens = Lexer::new("").tokenize().unwrap();
        let mut parser = Parser::new(&tokens).unwrap();
        parser.advance();
        parser.advance();
        assert!(parser.is_at_end());
        assert_eq!(parser.position, 0);
    }
}
