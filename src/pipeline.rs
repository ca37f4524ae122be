//! Lex → parse → evaluate in one call
//!
//! [`run`] is the entry point used by the REPL, the TUI and the file mode.
//! Each run owns a fresh token vector and AST, so nothing leaks from one
//! line into the next. [`trace`] does the same work but keeps every
//! intermediate artifact for the visualizers.

use crate::interpreter::engine::evaluate;
use crate::interpreter::errors::EvalError;
use crate::parser::ast::AstNode;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::source::CharSource;
use rustc_hash::FxHashMap;
use std::fmt;
use std::io::Read;

/// Which kind of character source backs the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    StringBacked,
    StreamBacked,
}

/// Raw input for one pipeline run
pub enum Input<'a> {
    Text(&'a str),
    Stream(Box<dyn Read + 'a>),
}

impl Input<'_> {
    pub fn mode(&self) -> InputMode {
        match self {
            Input::Text(_) => InputMode::StringBacked,
            Input::Stream(_) => InputMode::StreamBacked,
        }
    }
}

/// Pipeline stage a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Arithmetic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lex => write!(f, "lex"),
            Stage::Parse => write!(f, "parse"),
            Stage::Arithmetic => write!(f, "arithmetic"),
        }
    }
}

/// A failure at any stage of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Lex(LexError),
    Parse(ParseError),
    Arithmetic(EvalError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Lex(_) => Stage::Lex,
            PipelineError::Parse(_) => Stage::Parse,
            PipelineError::Arithmetic(_) => Stage::Arithmetic,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Lex(e) => write!(f, "Invalid syntax: {}", e),
            PipelineError::Parse(e) => write!(f, "Invalid expression: {}", e),
            PipelineError::Arithmetic(e) => write!(f, "Arithmetic error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Lex(e) => Some(e),
            PipelineError::Parse(e) => Some(e),
            PipelineError::Arithmetic(e) => Some(e),
        }
    }
}

impl From<LexError> for PipelineError {
    fn from(err: LexError) -> Self {
        PipelineError::Lex(err)
    }
}

impl From<ParseError> for PipelineError {
    fn from(err: ParseError) -> Self {
        PipelineError::Parse(err)
    }
}

impl From<EvalError> for PipelineError {
    fn from(err: EvalError) -> Self {
        PipelineError::Arithmetic(err)
    }
}

/// Lex the whole input selected by `input`.
pub fn tokenize(input: Input<'_>) -> Result<Vec<Token>, LexError> {
    match input {
        Input::Text(text) => Lexer::new(text).tokenize(),
        Input::Stream(reader) => Lexer::from_reader(reader).tokenize(),
    }
}

/// Lex a custom character source.
pub fn tokenize_source<S: CharSource>(source: S) -> Result<Vec<Token>, LexError> {
    Lexer::with_source(source).tokenize()
}

/// Build the AST for a token sequence.
pub fn parse(tokens: &[Token]) -> Result<AstNode, ParseError> {
    Parser::new(tokens)?.generate_ast()
}

/// Run the full pipeline and return the value of the expression.
pub fn run(input: Input<'_>) -> Result<i64, PipelineError> {
    let tokens = tokenize(input)?;
    let ast = parse(&tokens)?;
    Ok(evaluate(&ast)?)
}

/// Convenience wrapper for string-backed input.
pub fn eval_str(text: &str) -> Result<i64, PipelineError> {
    run(Input::Text(text))
}

/// Everything one pipeline run produced, for display.
///
/// Fields after the failing stage are empty; `result` holds the value or
/// the failure.
#[derive(Debug, Clone)]
pub struct Trace {
    pub tokens: Vec<Token>,
    pub ast: Option<AstNode>,
    pub result: Result<i64, PipelineError>,
}

impl Trace {
    /// Count tokens per kind name, whitespace included.
    pub fn token_histogram(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for token in &self.tokens {
            *counts.entry(token.kind.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Tokens that carry meaning, whitespace dropped.
    pub fn significant_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.kind != TokenKind::Space)
    }
}

/// Run the pipeline and keep the intermediate artifacts.
pub fn trace(input: Input<'_>) -> Trace {
    let tokens = match tokenize(input) {
        Ok(tokens) => tokens,
        Err(e) => {
            return Trace {
                tokens: Vec::new(),
                ast: None,
                result: Err(e.into()),
            }
        }
    };

    let ast = match parse(&tokens) {
        Ok(ast) => ast,
        Err(e) => {
            return Trace {
                tokens,
                ast: None,
                result: Err(e.into()),
            }
        }
    };

    let result = evaluate(&ast).map_err(PipelineError::from);
    Trace {
        tokens,
        ast: Some(ast),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::LexErrorKind;
    use std::io::Cursor;

    #[test]
    fn test_run_string_backed() {
        assert_eq!(eval_str("2+3*4"), Ok(14));
        assert_eq!(eval_str(" 1  +   2 \n"), Ok(3));
    }

    #[test]
    fn test_run_stream_backed() {
        let input = Input::Stream(Box::new(Cursor::new(b"(2+3)*4\n".to_vec())));
        assert_eq!(input.mode(), InputMode::StreamBacked);
        assert_eq!(run(input), Ok(20));
    }

    /// Hands out characters from a fixed list, then fails like a broken pipe.
    struct FlakySource {
        chars: Vec<char>,
        position: usize,
    }

    impl CharSource for FlakySource {
        fn read_char(&mut self) -> std::io::Result<Option<char>> {
            let ch = self.chars.get(self.position).copied().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "source closed")
            })?;
            self.position += 1;
            Ok(Some(ch))
        }

        fn unread_char(&mut self, _ch: char) {
            self.position -= 1;
        }
    }

    #[test]
    fn test_tokenize_custom_source() {
        let source = FlakySource {
            chars: "12+3".chars().collect(),
            position: 0,
        };
        let err = tokenize_source(source).unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::Io(_)));
        assert_eq!(err.location.column, 5);

        let mut chars: Vec<char> = "12+3".chars().collect();
        chars.push('\0');
        let err = tokenize_source(FlakySource { chars, position: 0 }).unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::UnexpectedChar('\0')));
    }

    #[test]
    fn test_failures_are_stage_tagged() {
        assert_eq!(eval_str("1 # 2").unwrap_err().stage(), Stage::Lex);
        assert_eq!(eval_str("(1+2").unwrap_err().stage(), Stage::Parse);
        assert_eq!(eval_str("*3").unwrap_err().stage(), Stage::Parse);
        assert_eq!(eval_str("5/0").unwrap_err().stage(), Stage::Arithmetic);
        assert_eq!(eval_str("5%0").unwrap_err().stage(), Stage::Arithmetic);
    }

    #[test]
    fn test_error_display_prefix() {
        assert!(eval_str("!").unwrap_err().to_string().starts_with("Invalid syntax"));
        assert!(eval_str("1+").unwrap_err().to_string().starts_with("Invalid expression"));
        assert!(eval_str("1/0").unwrap_err().to_string().starts_with("Arithmetic error"));
    }

    #[test]
    fn test_trace_keeps_artifacts() {
        let trace = trace(Input::Text("1 + 2"));
        assert_eq!(trace.result, Ok(3));
        assert_eq!(trace.tokens.len(), 6);
        assert_eq!(trace.significant_tokens().count(), 4);
        assert!(trace.ast.is_some());

        let histogram = trace.token_histogram();
        assert_eq!(histogram.get("NUMBER"), Some(&2));
        assert_eq!(histogram.get("SPACE"), Some(&2));
        assert_eq!(histogram.get("EOF"), Some(&1));
    }

    #[test]
    fn test_trace_stops_at_failing_stage() {
        let lexed = trace(Input::Text("1 $"));
        assert!(lexed.tokens.is_empty());
        assert!(lexed.ast.is_none());

        let parsed = trace(Input::Text("(1"));
        assert!(!parsed.tokens.is_empty());
        assert!(parsed.ast.is_none());

        let evaluated = trace(Input::Text("4/0"));
        assert!(evaluated.ast.is_some());
        assert_eq!(evaluated.result.unwrap_err().stage(), Stage::Arithmetic);
    }
}
