//! Error types for the pageconv library.

use std::io;
use thiserror::Error;

/// Result type alias for pageconv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting layout documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is neither PAGE XML nor a supported JSON layout format.
    #[error("Unknown file format: not PAGE XML or a supported JSON layout")]
    UnknownFormat,

    /// The PAGE schema version identifier is not supported.
    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing XML structure.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Error parsing JSON structure.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// The document is structurally broken (missing root, bad attributes).
    #[error("Malformed layout document: {0}")]
    MalformedDocument(String),

    /// The GtsID pattern or resolved value is not usable.
    #[error("Invalid GtsID: {0}")]
    InvalidGtsId(String),

    /// A text filter rule could not be parsed.
    #[error("Invalid text filter rule: {0}")]
    InvalidFilterRule(String),

    /// The document failed pre-write validation.
    #[error("Document validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// Error serializing the output document.
    #[error("Write error: {0}")]
    Write(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => Error::Io(io::Error::new(e.kind(), e.to_string())),
            _ => Error::XmlParse(err.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonParse(err.to_string())
    }
}

/// A single structured error produced by pre-write validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Identifier of the offending object, or a path-like label for
    /// document-level problems (e.g. `"Page"`, `"Metadata/GtsId"`).
    pub object: String,

    /// Human-readable description of the problem.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.object, self.message)
    }
}
