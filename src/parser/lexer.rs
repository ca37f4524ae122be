//! Lexer (tokenizer) for expression lines
//!
//! Reads a [`CharSource`] one character at a time and produces one [`Token`]
//! per [`Lexer::next_token`] call. Whitespace is not skipped: every call that
//! reads a single whitespace character returns its own [`TokenKind::Space`]
//! token, and the parser treats those as transparent.

use super::ast::SourceLocation;
use super::source::{CharSource, StreamSource, StringSource};
use std::fmt;
use std::io::Read;

/// All lexical categories produced by the lexer.
///
/// Only [`TokenKind::Number`] and [`TokenKind::Ident`] carry a payload. The
/// comparison, logical, shift, ternary and `;` kinds are recognized but the
/// grammar never consumes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    Space,
    Eof,

    // Arithmetic
    Plus,     // +
    Minus,    // -
    Div,      // /
    Multiply, // *
    Mod,      // %

    // Ternary
    QMark, // ?
    Colon, // :

    // Comparison
    NEquality, // !=
    Equality,  // ==
    Lte,       // <=
    Lt,        // <
    Gte,       // >=
    Gt,        // >

    // Logical
    LAnd, // &&
    LOr,  // ||

    // Bitwise
    BwAnd,  // &
    BwOr,   // | (and a bare =)
    BwXor,  // ^
    BwNeg,  // ~
    LShift, // <<
    RShift, // >>

    // Punctuation
    LParen,    // (
    RParen,    // )
    Semicolon, // ;

    // Literals
    Number(String),
    Ident(String),
}

impl TokenKind {
    /// Short upper-case tag used by the token views.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Space => "SPACE",
            TokenKind::Eof => "EOF",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Div => "DIV",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Mod => "MOD",
            TokenKind::QMark => "QMARK",
            TokenKind::Colon => "COLON",
            TokenKind::NEquality => "NEQUALITY",
            TokenKind::Equality => "EQUALITY",
            TokenKind::Lte => "LTE",
            TokenKind::Lt => "LT",
            TokenKind::Gte => "GTE",
            TokenKind::Gt => "GT",
            TokenKind::LAnd => "LAND",
            TokenKind::LOr => "LOR",
            TokenKind::BwAnd => "BWAND",
            TokenKind::BwOr => "BWOR",
            TokenKind::BwXor => "BWXOR",
            TokenKind::BwNeg => "BWNEG",
            TokenKind::LShift => "LSHIFT",
            TokenKind::RShift => "RSHIFT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Ident(_) => "IDENT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Space => write!(f, "whitespace"),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Div => write!(f, "'/'"),
            TokenKind::Multiply => write!(f, "'*'"),
            TokenKind::Mod => write!(f, "'%'"),
            TokenKind::QMark => write!(f, "'?'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::NEquality => write!(f, "'!='"),
            TokenKind::Equality => write!(f, "'=='"),
            TokenKind::Lte => write!(f, "'<='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gte => write!(f, "'>='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::LAnd => write!(f, "'&&'"),
            TokenKind::LOr => write!(f, "'||'"),
            TokenKind::BwAnd => write!(f, "'&'"),
            TokenKind::BwOr => write!(f, "'|'"),
            TokenKind::BwXor => write!(f, "'^'"),
            TokenKind::BwNeg => write!(f, "'~'"),
            TokenKind::LShift => write!(f, "'<<'"),
            TokenKind::RShift => write!(f, "'>>'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
        }
    }
}

/// A classified lexeme and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// True for tokens that carry literal text (numbers and identifiers).
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TokenKind::Number(_) | TokenKind::Ident(_))
    }

    /// The literal text of a number or identifier token.
    pub fn literal(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Number(text) | TokenKind::Ident(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

/// What went wrong while lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that starts no token
    UnexpectedChar(char),
    /// An operator prefix that needs a second character (a bare `!`)
    IncompleteOperator(char),
    /// The stream backing the lexer failed
    Io(String),
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match &self.kind {
            LexErrorKind::UnexpectedChar(ch) if ch.is_control() => {
                format!("Unexpected character: '\\u{{{:x}}}'", *ch as u32)
            }
            LexErrorKind::UnexpectedChar(ch) => format!("Unexpected character: '{}'", ch),
            LexErrorKind::IncompleteOperator(ch) => {
                format!("'{}' must be followed by '='", ch)
            }
            LexErrorKind::Io(message) => format!("Read failed: {}", message),
        };
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, message
        )
    }
}

impl std::error::Error for LexError {}

/// Space, tab, newline, carriage return, vertical tab and form feed.
fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Lexer over any [`CharSource`]
pub struct Lexer<S: CharSource> {
    source: S,
    line: usize,
    column: usize,
    previous: SourceLocation,
}

impl Lexer<StringSource> {
    /// Create a string-backed lexer for the given line.
    pub fn new(input: &str) -> Self {
        Self::with_source(StringSource::new(input))
    }
}

impl<R: Read> Lexer<StreamSource<R>> {
    /// Create a stream-backed lexer reading raw bytes from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Self::with_source(StreamSource::new(reader))
    }
}

impl<S: CharSource> Lexer<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            line: 1,
            column: 1,
            previous: SourceLocation::default(),
        }
    }

    /// Tokenize the entire input, up to and including the EOF token.
    ///
    /// On failure the tokens produced so far are dropped.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Produce the next token.
    ///
    /// Once the input is exhausted every call returns EOF.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = match self.advance()? {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, loc)),
        };

        if is_space(ch) {
            return Ok(Token::new(TokenKind::Space, loc));
        }

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Div,
            '*' => TokenKind::Multiply,
            '%' => TokenKind::Mod,
            '?' => TokenKind::QMark,
            ':' => TokenKind::Colon,
            '^' => TokenKind::BwXor,
            '~' => TokenKind::BwNeg,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,

            '!' => {
                if self.matches_next('=')? {
                    TokenKind::NEquality
                } else {
                    return Err(LexError {
                        kind: LexErrorKind::IncompleteOperator('!'),
                        location: loc,
                    });
                }
            }
            '=' => {
                if self.matches_next('=')? {
                    TokenKind::Equality
                } else {
                    // A single '=' shares the bitwise-or tag
                    TokenKind::BwOr
                }
            }
            '&' => {
                if self.matches_next('&')? {
                    TokenKind::LAnd
                } else {
                    TokenKind::BwAnd
                }
            }
            '|' => {
                if self.matches_next('|')? {
                    TokenKind::LOr
                } else {
                    TokenKind::BwOr
                }
            }
            '<' => {
                if self.matches_next('<')? {
                    TokenKind::LShift
                } else if self.matches_next('=')? {
                    TokenKind::Lte
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.matches_next('>')? {
                    TokenKind::RShift
                } else if self.matches_next('=')? {
                    TokenKind::Gte
                } else {
                    TokenKind::Gt
                }
            }

            '0'..='9' => TokenKind::Number(self.take_while(ch, |c| c.is_ascii_digit())?),
            'a'..='z' | 'A'..='Z' | '_' => {
                TokenKind::Ident(self.take_while(ch, |c| c.is_ascii_alphabetic())?)
            }

            _ => {
                return Err(LexError {
                    kind: LexErrorKind::UnexpectedChar(ch),
                    location: loc,
                })
            }
        };

        Ok(Token::new(kind, loc))
    }

    /// Accumulate `first` and the maximal run of characters matching `pred`.
    fn take_while(&mut self, first: char, pred: impl Fn(char) -> bool) -> Result<String, LexError> {
        let mut text = String::new();
        text.push(first);

        while let Some(ch) = self.advance()? {
            if !pred(ch) {
                self.retreat(ch);
                break;
            }
            text.push(ch);
        }

        Ok(text)
    }

    /// Consume the next character if it is `expected`, otherwise push it back.
    fn matches_next(&mut self, expected: char) -> Result<bool, LexError> {
        match self.advance()? {
            Some(ch) if ch == expected => Ok(true),
            Some(ch) => {
                self.retreat(ch);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    /// Read one character and track its position.
    fn advance(&mut self) -> Result<Option<char>, LexError> {
        let ch = self.source.read_char().map_err(|err| LexError {
            kind: LexErrorKind::Io(err.to_string()),
            location: self.current_location(),
        })?;

        if let Some(ch) = ch {
            self.previous = self.current_location();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        Ok(ch)
    }

    /// Give back the character returned by the last [`Lexer::advance`].
    fn retreat(&mut self, ch: char) {
        self.source.unread_char(ch);
        self.line = self.previous.line;
        self.column = self.previous.column;
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
