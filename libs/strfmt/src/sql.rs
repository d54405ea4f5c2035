//! Relational-store codec.
//!
//! A driver hands a column to [`SqlScan`] as a [`DbValue`] and receives one back
//! from [`SqlValue`]. `NULL` and empty text scan to the zero value. Numeric
//! sources are rejected except by durations, which are stored as nanoseconds.

use chrono::{DateTime, FixedOffset};

use crate::{CodecOptions, FormatError};

/// A column value as supplied by, or handed to, a SQL driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Null,
    Text(String),
    Bytes(Vec<u8>),
    Time(DateTime<FixedOffset>),
    Int(i64),
    Float(f64),
}

impl DbValue {
    /// Short name of the source kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DbValue::Null => "null",
            DbValue::Text(_) => "text",
            DbValue::Bytes(_) => "bytes",
            DbValue::Time(_) => "time",
            DbValue::Int(_) => "int",
            DbValue::Float(_) => "float",
        }
    }
}

/// Decoding from a relational column.
pub trait SqlScan: Sized {
    fn scan_with(src: DbValue, options: &CodecOptions) -> Result<Self, FormatError>;

    /// Decodes with the default options.
    fn scan(src: DbValue) -> Result<Self, FormatError> {
        Self::scan_with(src, CodecOptions::defaults())
    }
}

/// Encoding for a relational column.
pub trait SqlValue {
    fn value_with(&self, options: &CodecOptions) -> Result<DbValue, FormatError>;

    /// Encodes with the default options.
    fn value(&self) -> Result<DbValue, FormatError> {
        self.value_with(CodecOptions::defaults())
    }
}

/// A relational codec bound to one set of options.
#[derive(Debug, Clone, Default)]
pub struct SqlCodec {
    options: CodecOptions,
}

impl SqlCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn scan<T: SqlScan>(&self, src: DbValue) -> Result<T, FormatError> {
        T::scan_with(src, &self.options)
    }

    pub fn value<T: SqlValue + ?Sized>(&self, value: &T) -> Result<DbValue, FormatError> {
        value.value_with(&self.options)
    }
}

/// Extracts text from a text or bytes source. `NULL` and empty text yield `None`.
pub fn scan_text(src: DbValue, format: &str) -> Result<Option<String>, FormatError> {
    let text = match src {
        DbValue::Null => return Ok(None),
        DbValue::Text(text) => text,
        DbValue::Bytes(bytes) => String::from_utf8(bytes).map_err(|e| {
            FormatError::invalid(format, String::from_utf8_lossy(e.as_bytes()))
        })?,
        other => return Err(FormatError::unsupported(format, other.kind())),
    };
    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}
