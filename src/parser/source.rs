//! Character sources consumed by the lexer
//!
//! The lexer reads one character at a time and may give back the last one
//! it read. Two sources implement that capability:
//! - [`StringSource`]: an in-memory line of text
//! - [`StreamSource`]: any [`Read`] implementor, read byte by byte
//!
//! Both yield `None` once the input is exhausted and keep yielding `None`
//! on every later read.

use std::io::{self, Bytes, Read};

/// Sequential character source with one character of push-back.
pub trait CharSource {
    /// Read the next character, or `None` at end of input.
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Return `ch` (the character just read) to the source.
    ///
    /// Must not be called twice without a read in between.
    fn unread_char(&mut self, ch: char);
}

/// String-backed source
///
/// An embedded NUL ends the input.
pub struct StringSource {
    input: Vec<char>,
    position: usize,
    can_unread: bool,
}

impl StringSource {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            can_unread: false,
        }
    }
}

impl CharSource for StringSource {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        match self.input.get(self.position) {
            Some('\0') | None => {
                self.can_unread = false;
                Ok(None)
            }
            Some(&ch) => {
                self.position += 1;
                self.can_unread = true;
                Ok(Some(ch))
            }
        }
    }

    fn unread_char(&mut self, _ch: char) {
        debug_assert!(self.can_unread, "push-back called twice in a row");
        if self.can_unread {
            self.position -= 1;
            self.can_unread = false;
        }
    }
}

/// Stream-backed source over raw bytes
pub struct StreamSource<R: Read> {
    bytes: Bytes<R>,
    pushed_back: Option<char>,
    exhausted: bool,
}

impl<R: Read> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            pushed_back: None,
            exhausted: false,
        }
    }
}

impl<R: Read> CharSource for StreamSource<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if let Some(ch) = self.pushed_back.take() {
            return Ok(Some(ch));
        }
        if self.exhausted {
            return Ok(None);
        }
        match self.bytes.next() {
            Some(byte) => Ok(Some(byte? as char)),
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }

    fn unread_char(&mut self, ch: char) {
        debug_assert!(self.pushed_back.is_none(), "push-back called twice in a row");
        self.pushed_back = Some(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(source: &mut dyn CharSource) -> String {
        let mut out = String::new();
        while let Some(ch) = source.read_char().unwrap() {
            out.push(ch);
        }
        out
    }

    #[test]
    fn test_string_source_push_back() {
        let mut source = StringSource::new("ab");
        assert_eq!(source.read_char().unwrap(), Some('a'));
        source.unread_char('a');
        assert_eq!(drain(&mut source), "ab");
        assert_eq!(source.read_char().unwrap(), None);
        assert_eq!(source.read_char().unwrap(), None);
    }

    #[test]
    fn test_string_source_stops_at_nul() {
        let mut source = StringSource::new("1+\02");
        assert_eq!(drain(&mut source), "1+");
    }

    #[test]
    fn test_stream_source_push_back() {
        let mut source = StreamSource::new(Cursor::new(b"xyz".to_vec()));
        assert_eq!(source.read_char().unwrap(), Some('x'));
        source.unread_char('x');
        assert_eq!(drain(&mut source), "xyz");
        assert_eq!(source.read_char().unwrap(), None);
    }

    #[test]
    fn test_stream_source_is_idempotent_at_end() {
        let mut source = StreamSource::new(Cursor::new(Vec::new()));
        for _ in 0..3 {
            assert_eq!(source.read_char().unwrap(), None);
        }
    }
}
