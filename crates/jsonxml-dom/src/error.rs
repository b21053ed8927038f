//! Error types for building, parsing and serializing XML trees.

use thiserror::Error;

/// Errors raised by the XML tree and its markup reader/writer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// A proposed element, attribute or prefix name is not a valid XML name.
    #[error("invalid XML name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// An attribute was asked to hold a value that has no attribute representation.
    #[error("attribute '{name}' cannot hold {found}")]
    UnsupportedAttributeValue {
        /// The attribute name.
        name: String,
        /// Description of the rejected value.
        found: String,
    },

    /// A namespace prefix that is reserved for one URI was bound to another.
    #[error("namespace prefix '{prefix}' is reserved for '{reserved}' and cannot be bound to '{uri}'")]
    ReservedPrefix {
        /// The prefix.
        prefix: String,
        /// The URI the prefix must keep.
        reserved: String,
        /// The URI it was bound to.
        uri: String,
    },

    /// The markup could not be tokenized.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The markup tokenized but does not form a single well-formed element tree.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// Writing markup to the output failed.
    #[error("XML write error: {0}")]
    Io(String),
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        XmlError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for XmlError {
    fn from(err: std::io::Error) -> Self {
        XmlError::Io(err.to_string())
    }
}

/// Result type alias for XML tree operations.
pub type Result<T> = std::result::Result<T, XmlError>;
