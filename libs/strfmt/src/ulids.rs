//! ULID: a 48-bit millisecond timestamp followed by 80 random bits, written as
//! 26 Crockford base32 characters.

use std::fmt;
use std::str::FromStr;

use crate::document::{self, DocValue, DocumentCodec};
use crate::sql::{DbValue, SqlScan, SqlValue};
use crate::{CodecOptions, FormatError, TextCodec};

const ULID_LEN: usize = 26;

/// Crockford base32 value of an ASCII symbol. `I`, `L`, `O` and `U` are not
/// symbols.
fn crockford_value(b: u8) -> Option<u8> {
    let v = match b.to_ascii_uppercase() {
        c @ b'0'..=b'9' => c - b'0',
        c @ b'A'..=b'H' => c - b'A' + 10,
        b'J' => 18,
        b'K' => 19,
        b'M' => 20,
        b'N' => 21,
        c @ b'P'..=b'T' => c - b'P' + 22,
        c @ b'V'..=b'Z' => c - b'V' + 27,
        _ => return None,
    };
    Some(v)
}

fn decode(s: &str) -> Option<u128> {
    if s.len() != ULID_LEN {
        return None;
    }

    let mut value: u128 = 0;
    for (i, b) in s.bytes().enumerate() {
        let v = crockford_value(b)?;
        // 26 symbols carry 130 bits; the top two must be zero
        if i == 0 && v > 7 {
            return None;
        }
        value = (value << 5) | u128::from(v);
    }
    Some(value)
}

/// Returns true if `s` is a 26-character ULID.
pub fn is_ulid(s: &str) -> bool {
    decode(s).is_some()
}

/// A ULID. Equality and ordering follow the 128-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ulid(ulid::Ulid);

impl Ulid {
    /// The registry name of this format.
    pub const FORMAT: &'static str = "ulid";

    /// Parses a ULID, case-insensitively. Empty input is rejected.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        decode(s)
            .map(|v| Self(ulid::Ulid::from(v)))
            .ok_or_else(|| FormatError::invalid(Self::FORMAT, s))
    }

    /// A new ULID for the current time.
    pub fn generate() -> Self {
        Self(ulid::Ulid::new())
    }

    /// The all-zero ULID.
    pub const fn nil() -> Self {
        Self(ulid::Ulid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(ulid::Ulid::from_bytes(bytes))
    }

    /// Big-endian byte representation.
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_bytes()
    }

    /// Milliseconds since the Unix epoch encoded in the first 48 bits.
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }

    pub fn as_ulid(&self) -> &ulid::Ulid {
        &self.0
    }
}

impl Default for Ulid {
    fn default() -> Self {
        Self::nil()
    }
}

impl From<ulid::Ulid> for Ulid {
    fn from(u: ulid::Ulid) -> Self {
        Self(u)
    }
}

impl From<Ulid> for ulid::Ulid {
    fn from(u: Ulid) -> Self {
        u.0
    }
}

impl From<u128> for Ulid {
    fn from(v: u128) -> Self {
        Self(ulid::Ulid::from(v))
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ulid {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TextCodec for Ulid {
    fn unmarshal_text(text: &str) -> Result<Self, FormatError> {
        if text.is_empty() {
            return Ok(Self::nil());
        }
        Self::parse(text)
    }

    fn marshal_text(&self) -> String {
        self.to_string()
    }
}

impl serde::Serialize for Ulid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Ulid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
            Some(s) => Self::unmarshal_text(&s).map_err(serde::de::Error::custom),
            None => Ok(Self::nil()),
        }
    }
}

impl SqlScan for Ulid {
    fn scan_with(src: DbValue, options: &CodecOptions) -> Result<Self, FormatError> {
        options.ulid_sql.scan(src)
    }
}

impl SqlValue for Ulid {
    fn value_with(&self, options: &CodecOptions) -> Result<DbValue, FormatError> {
        options.ulid_sql.value(self)
    }
}

impl DocumentCodec for Ulid {
    fn to_document(&self) -> DocValue {
        DocValue::String(self.to_string())
    }

    fn from_document(value: DocValue) -> Result<Self, FormatError> {
        match document::expect_string(value, Self::FORMAT)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self::nil()),
        }
    }
}
