//! Forward-only character source for the JSON reader.
//!
//! `None` is the end-of-input sentinel. The stream tracks the position of
//! the next unread character so errors can point into the text.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{ConvertError, Position, Result, describe_expected};

pub(crate) struct CharStream<'a> {
    chars: Peekable<Chars<'a>>,
    position: Position,
}

impl<'a> CharStream<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            position: Position::START,
        }
    }

    /// Position of the next unread character, or of the end of input.
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// Returns the next character without consuming it, optionally
    /// discarding a run of whitespace first.
    pub(crate) fn peek(&mut self, skip_whitespace: bool) -> Option<char> {
        if skip_whitespace {
            while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
                self.next_char();
            }
        }
        self.chars.peek().copied()
    }

    pub(crate) fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position.offset += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    /// Consumes one character, which must be one of `one_of`.
    pub(crate) fn read_required(&mut self, one_of: &[char], skip_whitespace: bool) -> Result<char> {
        self.peek(skip_whitespace);
        let position = self.position;

        match self.next_char() {
            Some(c) if one_of.contains(&c) => Ok(c),
            found => Err(ConvertError::UnexpectedCharacter {
                expected: describe_expected(one_of),
                found: found.into(),
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Found;

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = CharStream::new("ab");
        assert_eq!(stream.peek(false), Some('a'));
        assert_eq!(stream.peek(false), Some('a'));
        assert_eq!(stream.next_char(), Some('a'));
        assert_eq!(stream.next_char(), Some('b'));
        assert_eq!(stream.peek(true), None);
        assert_eq!(stream.next_char(), None);
    }

    #[test]
    fn test_peek_skips_whitespace() {
        let mut stream = CharStream::new(" \t\r\n x");
        assert_eq!(stream.peek(false), Some(' '));
        assert_eq!(stream.peek(true), Some('x'));
        assert_eq!(stream.position().line, 2);
        assert_eq!(stream.position().column, 2);
        assert_eq!(stream.position().offset, 5);
    }

    #[test]
    fn test_position_counts_characters_and_bytes() {
        let mut stream = CharStream::new("äb");
        stream.next_char();
        assert_eq!(stream.position().offset, 2);
        assert_eq!(stream.position().column, 2);
    }

    #[test]
    fn test_read_required() -> Result<()> {
        let mut stream = CharStream::new("  ,}");
        assert_eq!(stream.read_required(&[',', '}'], true)?, ',');
        assert_eq!(stream.read_required(&[',', '}'], false)?, '}');

        let err = stream.read_required(&[':'], true).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnexpectedCharacter { found: Found::Eof, .. }
        ));
        Ok(())
    }

    #[test]
    fn test_read_required_reports_the_found_character() {
        let mut stream = CharStream::new("\n  ]");
        let err = stream.read_required(&[',', '}'], true).unwrap_err();

        match err {
            ConvertError::UnexpectedCharacter {
                expected,
                found,
                position,
            } => {
                assert_eq!(expected, "',', '}'");
                assert_eq!(found, Found::Char(']'));
                assert_eq!((position.line, position.column), (2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_required_without_skipping_whitespace() {
        let mut stream = CharStream::new(" :");
        let err = stream.read_required(&[':'], false).unwrap_err();
        assert!(err.to_string().contains("found ' '"));
    }
}
