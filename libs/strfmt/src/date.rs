//! The `date` format: an RFC 3339 `full-date`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::document::{self, DocValue, DocumentCodec};
use crate::sql::{self, DbValue, SqlScan, SqlValue};
use crate::{CodecOptions, FormatError, TextCodec};

const DATE_FORMAT: &str = "%Y-%m-%d";

static FULL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

/// Returns true for a `YYYY-MM-DD` calendar date.
pub fn is_date(s: &str) -> bool {
    parse_date(s).is_some()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if !FULL_DATE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// A calendar date. The zero value is 1970-01-01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// The registry name of this format.
    pub const FORMAT: &'static str = "date";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(s: &str) -> Result<Self, FormatError> {
        parse_date(s)
            .map(Self)
            .ok_or_else(|| FormatError::invalid(Self::FORMAT, s))
    }

    pub fn naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Date {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TextCodec for Date {
    fn unmarshal_text(text: &str) -> Result<Self, FormatError> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        Self::parse(text)
    }

    fn marshal_text(&self) -> String {
        self.to_string()
    }
}

impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
            Some(s) => Self::unmarshal_text(&s).map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

impl SqlScan for Date {
    fn scan_with(src: DbValue, _options: &CodecOptions) -> Result<Self, FormatError> {
        if let DbValue::Time(t) = src {
            return Ok(Self(t.date_naive()));
        }
        match sql::scan_text(src, Self::FORMAT)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self::default()),
        }
    }
}

impl SqlValue for Date {
    fn value_with(&self, _options: &CodecOptions) -> Result<DbValue, FormatError> {
        Ok(DbValue::Text(self.to_string()))
    }
}

impl DocumentCodec for Date {
    fn to_document(&self) -> DocValue {
        DocValue::String(self.to_string())
    }

    fn from_document(value: DocValue) -> Result<Self, FormatError> {
        match document::expect_string(value, Self::FORMAT)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self::default()),
        }
    }
}
