//! Codec configuration injected into the relational and text codecs.
//!
//! Behaviour that a caller may want to change per store (how date-times are
//! normalized before they are written, which instant an empty date-time stands
//! for, how ULIDs are laid out in a column) lives in [`CodecOptions`] rather than
//! in process-wide state. [`CodecOptions::default`] is the documented default.

use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, FixedOffset, Utc};

use crate::sql::{self, DbValue};
use crate::ulids::Ulid;
use crate::FormatError;

/// Date-time normalization applied before a value is written.
pub type NormalizeTimeFn = fn(DateTime<FixedOffset>) -> DateTime<FixedOffset>;

/// How a [`Ulid`] is stored in and read back from a relational column.
pub trait UlidSqlStrategy: Send + Sync {
    /// Decodes a column value.
    fn scan(&self, src: DbValue) -> Result<Ulid, FormatError>;

    /// Encodes a value for a column.
    fn value(&self, ulid: &Ulid) -> Result<DbValue, FormatError>;
}

/// Stores ULIDs as their 26-character text form. Scans accept text or raw
/// bytes holding that text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextUlidStrategy;

impl UlidSqlStrategy for TextUlidStrategy {
    fn scan(&self, src: DbValue) -> Result<Ulid, FormatError> {
        match sql::scan_text(src, Ulid::FORMAT)? {
            Some(text) => Ulid::parse(&text),
            None => Ok(Ulid::default()),
        }
    }

    fn value(&self, ulid: &Ulid) -> Result<DbValue, FormatError> {
        Ok(DbValue::Text(ulid.to_string()))
    }
}

/// Stores ULIDs as 16 big-endian bytes. Scans also accept the text form.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryUlidStrategy;

impl UlidSqlStrategy for BinaryUlidStrategy {
    fn scan(&self, src: DbValue) -> Result<Ulid, FormatError> {
        match src {
            DbValue::Bytes(bytes) if bytes.len() == 16 => {
                let mut raw = [0u8; 16];
                raw.copy_from_slice(&bytes);
                Ok(Ulid::from_bytes(raw))
            }
            other => TextUlidStrategy.scan(other),
        }
    }

    fn value(&self, ulid: &Ulid) -> Result<DbValue, FormatError> {
        Ok(DbValue::Bytes(ulid.to_bytes().to_vec()))
    }
}

/// Options shared by the codecs of every format.
#[derive(Clone)]
pub struct CodecOptions {
    /// Applied to a date-time before it is written to text, JSON or a store.
    pub normalize_time: NormalizeTimeFn,
    /// The instant an empty date-time decodes to.
    pub unix_zero: DateTime<FixedOffset>,
    /// Relational layout for ULIDs.
    pub ulid_sql: Arc<dyn UlidSqlStrategy>,
}

static DEFAULT_OPTIONS: LazyLock<CodecOptions> = LazyLock::new(CodecOptions::default);

impl CodecOptions {
    /// The process-wide default options.
    pub fn defaults() -> &'static CodecOptions {
        &DEFAULT_OPTIONS
    }

    /// Replaces the normalization applied before date-times are written.
    #[must_use]
    pub fn with_normalize_time(mut self, normalize: NormalizeTimeFn) -> Self {
        self.normalize_time = normalize;
        self
    }

    /// Replaces the instant empty date-time input decodes to.
    #[must_use]
    pub fn with_unix_zero(mut self, unix_zero: DateTime<FixedOffset>) -> Self {
        self.unix_zero = unix_zero;
        self
    }

    /// Replaces the ULID column layout.
    #[must_use]
    pub fn with_ulid_sql(mut self, strategy: impl UlidSqlStrategy + 'static) -> Self {
        self.ulid_sql = Arc::new(strategy);
        self
    }
}

/// Converts to UTC before writing.
pub fn normalize_to_utc(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    dt.with_timezone(&Utc).fixed_offset()
}

/// Keeps the offset the value was created with.
pub fn keep_offset(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    dt
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            normalize_time: keep_offset,
            unix_zero: DateTime::<Utc>::default().fixed_offset(),
            ulid_sql: Arc::new(TextUlidStrategy),
        }
    }
}

impl fmt::Debug for CodecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecOptions")
            .field("unix_zero", &self.unix_zero)
            .finish_non_exhaustive()
    }
}
