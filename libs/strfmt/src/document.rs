//! Binary-document codec for document databases.
//!
//! Most formats travel as a string element. Date-times use the store's native
//! UTC millisecond datetime, durations a 64-bit nanosecond count and object ids
//! the native 12-byte object id.

use crate::FormatError;

/// An element of a binary document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocValue {
    Null,
    String(String),
    /// Milliseconds since the Unix epoch, UTC.
    DateTime(i64),
    Int64(i64),
    ObjectId([u8; 12]),
    Binary(Vec<u8>),
}

impl DocValue {
    pub fn kind(&self) -> &'static str {
        match self {
            DocValue::Null => "null",
            DocValue::String(_) => "string",
            DocValue::DateTime(_) => "datetime",
            DocValue::Int64(_) => "int64",
            DocValue::ObjectId(_) => "objectid",
            DocValue::Binary(_) => "binary",
        }
    }
}

/// Conversion to and from a document element.
pub trait DocumentCodec: Sized {
    fn to_document(&self) -> DocValue;

    fn from_document(value: DocValue) -> Result<Self, FormatError>;
}

/// Extracts a string element. `Null` and the empty string yield `None`.
pub fn expect_string(value: DocValue, format: &str) -> Result<Option<String>, FormatError> {
    match value {
        DocValue::Null => Ok(None),
        DocValue::String(s) if s.is_empty() => Ok(None),
        DocValue::String(s) => Ok(Some(s)),
        other => Err(FormatError::unsupported(format, other.kind())),
    }
}
