//! Error types for JSON → XML conversion.
//!
//! Parsing stops at the first violation. Every JSON error carries the
//! [`Position`] of the offending character, or of the end of input when the
//! text ran out.

use std::fmt;

use jsonxml_dom::XmlError;
use thiserror::Error;

/// A location in the JSON text.
///
/// `offset` counts bytes from the start of the input; `line` and `column`
/// are 1-based, with columns counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The position of the first character of the input.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// What the reader found where it expected something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    Eof,
}

impl From<Option<char>> for Found {
    fn from(c: Option<char>) -> Self {
        c.map_or(Found::Eof, Found::Char)
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "'{}'", c),
            Found::Eof => write!(f, "EOF"),
        }
    }
}

/// Fieldless classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnexpectedCharacter,
    UnexpectedEndOfInput,
    UnterminatedString,
    ExpectedObjectOrArray,
    EmptyPropertyName,
    WhitespaceInPropertyName,
    DuplicatePropertyName,
    InvalidLiteral,
    UnknownEscapeSequence,
    InvalidUnicodeEscape,
    TrailingCharacters,
    NestingTooDeep,
    XmlConstructionFailed,
}

/// The error returned when JSON text cannot be converted to XML.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// A required structural character did not match any allowed option.
    #[error("invalid JSON: expected characters {expected}, found {found} at {position}")]
    UnexpectedCharacter {
        expected: String,
        found: Found,
        position: Position,
    },

    /// The input ended where more was structurally required.
    #[error("invalid JSON: unexpected EOF, expected {expected} at {position}")]
    UnexpectedEndOfInput { expected: String, position: Position },

    /// The input ended inside a string literal.
    #[error("invalid JSON: unexpected EOF, expected '\"' to close the string at {position}")]
    UnterminatedString { position: Position },

    /// The document does not start with an object or an array.
    #[error("invalid JSON: expected '{{' or '[', found {found} at {position}")]
    ExpectedObjectOrArray { found: Found, position: Position },

    #[error("invalid JSON: property name cannot be empty at {position}")]
    EmptyPropertyName { position: Position },

    #[error("invalid JSON: property name cannot contain whitespace ('{name}') at {position}")]
    WhitespaceInPropertyName { name: String, position: Position },

    #[error("invalid JSON: duplicate property name '{name}' at {position}")]
    DuplicatePropertyName { name: String, position: Position },

    /// A bare token is neither `true`/`false`/`null` nor a valid number.
    #[error("invalid JSON: expected a boolean, numeric or null value, found '{literal}' at {position}")]
    InvalidLiteral { literal: String, position: Position },

    #[error("invalid JSON: \\{escape} is not a known escape sequence at {position}")]
    UnknownEscapeSequence { escape: char, position: Position },

    /// `\u` was not followed by four hex digits, or encoded a lone surrogate.
    #[error("invalid JSON: expected '\\u' to be followed by four hex digits, found '{digits}' at {position}")]
    InvalidUnicodeEscape { digits: String, position: Position },

    /// Non-whitespace text follows the root value.
    #[error("invalid JSON: unexpected {found} after the root value at {position}")]
    TrailingCharacters { found: Found, position: Position },

    #[error("invalid JSON: nesting deeper than {limit} levels at {position}")]
    NestingTooDeep { limit: usize, position: Position },

    /// The XML tree rejected a proposed element or attribute.
    #[error("constructing the XML was unsuccessful: {0}")]
    XmlConstructionFailed(#[from] XmlError),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::UnexpectedCharacter { .. } => ErrorKind::UnexpectedCharacter,
            ConvertError::UnexpectedEndOfInput { .. } => ErrorKind::UnexpectedEndOfInput,
            ConvertError::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            ConvertError::ExpectedObjectOrArray { .. } => ErrorKind::ExpectedObjectOrArray,
            ConvertError::EmptyPropertyName { .. } => ErrorKind::EmptyPropertyName,
            ConvertError::WhitespaceInPropertyName { .. } => ErrorKind::WhitespaceInPropertyName,
            ConvertError::DuplicatePropertyName { .. } => ErrorKind::DuplicatePropertyName,
            ConvertError::InvalidLiteral { .. } => ErrorKind::InvalidLiteral,
            ConvertError::UnknownEscapeSequence { .. } => ErrorKind::UnknownEscapeSequence,
            ConvertError::InvalidUnicodeEscape { .. } => ErrorKind::InvalidUnicodeEscape,
            ConvertError::TrailingCharacters { .. } => ErrorKind::TrailingCharacters,
            ConvertError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            ConvertError::XmlConstructionFailed(_) => ErrorKind::XmlConstructionFailed,
        }
    }

    /// Where in the JSON text the error was detected, if it came from the reader.
    pub fn position(&self) -> Option<Position> {
        match self {
            ConvertError::UnexpectedCharacter { position, .. }
            | ConvertError::UnexpectedEndOfInput { position, .. }
            | ConvertError::UnterminatedString { position }
            | ConvertError::ExpectedObjectOrArray { position, .. }
            | ConvertError::EmptyPropertyName { position }
            | ConvertError::WhitespaceInPropertyName { position, .. }
            | ConvertError::DuplicatePropertyName { position, .. }
            | ConvertError::InvalidLiteral { position, .. }
            | ConvertError::UnknownEscapeSequence { position, .. }
            | ConvertError::InvalidUnicodeEscape { position, .. }
            | ConvertError::TrailingCharacters { position, .. }
            | ConvertError::NestingTooDeep { position, .. } => Some(*position),
            ConvertError::XmlConstructionFailed(_) => None,
        }
    }
}

/// Formats a set of acceptable characters as `'a', 'b'`.
pub(crate) fn describe_expected(one_of: &[char]) -> String {
    one_of
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
