//! The `date-time` format: an RFC 3339 timestamp.
//!
//! Validation is strict RFC 3339. Parsing is lenient and also accepts a space
//! separator, minute precision, offsets without a colon, local times (read as
//! UTC) and a bare date (midnight UTC). Output is RFC 3339 with millisecond
//! precision, using `Z` for a zero offset.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use regex::Regex;

use crate::document::{self, DocValue, DocumentCodec};
use crate::sql::{self, DbValue, SqlScan, SqlValue};
use crate::{CodecOptions, FormatError, TextCodec};

static RFC3339: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{1,9})?([Zz]|[+-][0-9]{2}:[0-9]{2})$",
    )
    .expect("valid RFC 3339 pattern")
});

static LENIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})",
        r"(?:[Tt ]([0-9]{2}):([0-9]{2})(?::([0-9]{2})(?:\.([0-9]{1,9}))?)?)?",
        r"\s*(?:([Zz])|([+-])([0-9]{2})(?::?([0-9]{2}))?)?$",
    ))
    .expect("valid date-time pattern")
});

/// Returns true for a strict RFC 3339 `date-time`.
pub fn is_datetime(s: &str) -> bool {
    RFC3339.is_match(s) && parse_lenient(s).is_some()
}

fn parse_lenient(s: &str) -> Option<chrono::DateTime<FixedOffset>> {
    let caps = LENIENT.captures(s)?;
    let num = |i: usize| -> Option<u32> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, num(2)?, num(3)?)?;

    let nanos = match caps.get(7) {
        Some(frac) => format!("{:0<9}", frac.as_str()).parse().ok()?,
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(num(4)?, num(5)?, num(6)?, nanos)?;

    let offset_secs = match caps.get(9) {
        Some(sign) => {
            let (hours, minutes) = (num(10)?, num(11)?);
            if minutes >= 60 {
                return None;
            }
            let secs = i32::try_from(hours * 3600 + minutes * 60).ok()?;
            if sign.as_str() == "-" {
                -secs
            } else {
                secs
            }
        }
        None => 0,
    };
    let offset = FixedOffset::east_opt(offset_secs)?;

    offset.from_local_datetime(&date.and_time(time)).single()
}

/// An instant with the UTC offset it was written with.
///
/// Equality and ordering compare instants, so `19:00+01:00` equals
/// `18:00Z`. The zero value is the Unix epoch in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(chrono::DateTime<FixedOffset>);

impl DateTime {
    /// The registry name of this format.
    pub const FORMAT: &'static str = "date-time";

    pub fn new(dt: chrono::DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// The current time in UTC.
    pub fn now() -> Self {
        Self(Utc::now().fixed_offset())
    }

    /// The Unix epoch in UTC.
    pub fn unix_zero() -> Self {
        Self(chrono::DateTime::<Utc>::default().fixed_offset())
    }

    /// Parses any of the accepted date-time layouts. Empty input is rejected.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        parse_lenient(s)
            .map(Self)
            .ok_or_else(|| FormatError::invalid(Self::FORMAT, s))
    }

    /// Decodes text, mapping empty input to the configured unix-zero instant.
    pub fn unmarshal_text_with(text: &str, options: &CodecOptions) -> Result<Self, FormatError> {
        if text.is_empty() {
            return Ok(Self(options.unix_zero));
        }
        Self::parse(text)
    }

    /// Canonical text after applying the configured normalization.
    pub fn format_with(&self, options: &CodecOptions) -> String {
        (options.normalize_time)(self.0).to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Binds the value to a set of options for display or serialization.
    pub fn with_options<'a>(&'a self, options: &'a CodecOptions) -> WithOptions<'a> {
        WithOptions {
            value: self,
            options,
        }
    }

    /// Returns true if this is the default unix-zero instant.
    pub fn is_unix_zero(&self) -> bool {
        self.is_unix_zero_with(CodecOptions::defaults())
    }

    pub fn is_unix_zero_with(&self, options: &CodecOptions) -> bool {
        self.0 == options.unix_zero
    }

    pub fn as_datetime(&self) -> &chrono::DateTime<FixedOffset> {
        &self.0
    }

    pub fn to_utc(&self) -> chrono::DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self::unix_zero()
    }
}

impl From<chrono::DateTime<FixedOffset>> for DateTime {
    fn from(dt: chrono::DateTime<FixedOffset>) -> Self {
        Self(dt)
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(dt: chrono::DateTime<Utc>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(CodecOptions::defaults()))
    }
}

impl FromStr for DateTime {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TextCodec for DateTime {
    fn unmarshal_text(text: &str) -> Result<Self, FormatError> {
        Self::unmarshal_text_with(text, CodecOptions::defaults())
    }

    fn marshal_text(&self) -> String {
        self.to_string()
    }
}

/// A [`DateTime`] paired with the options used to render it.
#[derive(Debug, Clone, Copy)]
pub struct WithOptions<'a> {
    value: &'a DateTime,
    options: &'a CodecOptions,
}

impl fmt::Display for WithOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value.format_with(self.options))
    }
}

impl serde::Serialize for WithOptions<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl serde::Serialize for DateTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
            Some(s) => Self::unmarshal_text(&s).map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

impl SqlScan for DateTime {
    fn scan_with(src: DbValue, options: &CodecOptions) -> Result<Self, FormatError> {
        if let DbValue::Time(t) = src {
            return Ok(Self(t));
        }
        match sql::scan_text(src, Self::FORMAT)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self(options.unix_zero)),
        }
    }
}

impl SqlValue for DateTime {
    fn value_with(&self, options: &CodecOptions) -> Result<DbValue, FormatError> {
        Ok(DbValue::Text(self.format_with(options)))
    }
}

impl DocumentCodec for DateTime {
    fn to_document(&self) -> DocValue {
        DocValue::DateTime(self.0.timestamp_millis())
    }

    fn from_document(value: DocValue) -> Result<Self, FormatError> {
        match value {
            DocValue::DateTime(millis) => Utc
                .timestamp_millis_opt(millis)
                .single()
                .map(Self::from)
                .ok_or_else(|| FormatError::invalid(Self::FORMAT, millis.to_string())),
            other => match document::expect_string(other, Self::FORMAT)? {
                Some(text) => Self::parse(&text),
                None => Ok(Self::default()),
            },
        }
    }
}
