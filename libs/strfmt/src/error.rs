//! Error types for format parsing and decoding.

use thiserror::Error;

/// Errors that can occur when parsing or decoding a format value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The input is not a well-formed instance of the format.
    #[error("{value:?} is not a valid {format}")]
    Invalid { format: String, value: String },

    /// A relational or document codec was handed a source it cannot decode.
    #[error("cannot decode {format} from {source_kind}")]
    UnsupportedSource {
        format: String,
        source_kind: &'static str,
    },

    /// A structured-document token that is neither a string nor null.
    #[error("cannot decode {format} from JSON token {token}")]
    UnexpectedToken { format: String, token: String },

    /// No format is registered under the name.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

impl FormatError {
    pub(crate) fn invalid(format: impl Into<String>, value: impl Into<String>) -> Self {
        FormatError::Invalid {
            format: format.into(),
            value: value.into(),
        }
    }

    pub(crate) fn unsupported(format: impl Into<String>, source_kind: &'static str) -> Self {
        FormatError::UnsupportedSource {
            format: format.into(),
            source_kind,
        }
    }

    /// Returns true if this error reports malformed input.
    pub fn is_invalid(&self) -> bool {
        matches!(self, FormatError::Invalid { .. })
    }

    /// Returns the format name the error refers to.
    pub fn format_name(&self) -> &str {
        match self {
            FormatError::Invalid { format, .. }
            | FormatError::UnsupportedSource { format, .. }
            | FormatError::UnexpectedToken { format, .. } => format,
            FormatError::UnknownFormat(name) => name,
        }
    }
}
