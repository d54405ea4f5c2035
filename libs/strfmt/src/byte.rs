//! The `byte` format: base64-encoded binary data.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::document::{self, DocValue, DocumentCodec};
use crate::sql::{self, DbValue, SqlScan, SqlValue};
use crate::{CodecOptions, FormatError, TextCodec};

/// Decoded bytes of a standard base64 string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base64(Vec<u8>);

impl Base64 {
    /// The registry name of this format.
    pub const FORMAT: &'static str = "byte";

    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decodes standard, padded base64.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        STANDARD
            .decode(s)
            .map(Self)
            .map_err(|_| FormatError::invalid(Self::FORMAT, s))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Base64 {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Base64 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Base64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&STANDARD.encode(&self.0))
    }
}

impl FromStr for Base64 {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TextCodec for Base64 {
    fn unmarshal_text(text: &str) -> Result<Self, FormatError> {
        Self::parse(text)
    }

    fn marshal_text(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl serde::Serialize for Base64 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.marshal_text())
    }
}

impl<'de> serde::Deserialize<'de> for Base64 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
            Some(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

impl SqlScan for Base64 {
    fn scan_with(src: DbValue, _options: &CodecOptions) -> Result<Self, FormatError> {
        match sql::scan_text(src, Self::FORMAT)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self::default()),
        }
    }
}

impl SqlValue for Base64 {
    fn value_with(&self, _options: &CodecOptions) -> Result<DbValue, FormatError> {
        Ok(DbValue::Text(self.marshal_text()))
    }
}

impl DocumentCodec for Base64 {
    fn to_document(&self) -> DocValue {
        DocValue::String(self.marshal_text())
    }

    fn from_document(value: DocValue) -> Result<Self, FormatError> {
        if let DocValue::Binary(bytes) = value {
            return Ok(Self(bytes));
        }
        match document::expect_string(value, Self::FORMAT)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "This is a byte array with unprintable chars, but it also isn";
    const ENCODED: &str = "VGhpcyBpcyBhIGJ5dGUgYXJyYXkgd2l0aCB1bnByaW50YWJsZSBjaGFycywgYnV0IGl0IGFsc28gaXNu";

    #[test]
    fn test_text_roundtrip() {
        let subject = Base64::unmarshal_text(ENCODED).unwrap();
        assert_eq!(subject.as_bytes(), PLAIN.as_bytes());
        assert_eq!(subject.marshal_text(), ENCODED);
        assert_eq!(subject.to_string(), ENCODED);
    }

    #[test]
    fn test_empty_text_is_empty_value() {
        let subject = Base64::unmarshal_text("").unwrap();
        assert!(subject.is_empty());
    }

    #[test]
    fn test_rejects_unpadded_and_garbage() {
        assert!(Base64::parse("ZWxpemFiZXRocG9zZXk").is_err());
        assert!(Base64::parse("not base64!").is_err());
        assert_eq!(
            Base64::parse("ZWxpemFiZXRocG9zZXk=").unwrap().as_bytes(),
            b"elizabethposey"
        );
    }

    #[test]
    fn test_json() {
        let subject = Base64::new(PLAIN.as_bytes());
        let json = serde_json::to_string(&subject).unwrap();
        assert_eq!(json, format!("\"{ENCODED}\""));
        let back: Base64 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, subject);
        assert!(serde_json::from_str::<Base64>("null").unwrap().is_empty());
    }

    #[test]
    fn test_sql() {
        let subject = Base64::new(PLAIN.as_bytes());
        assert_eq!(subject.value().unwrap(), DbValue::Text(ENCODED.to_string()));
        assert_eq!(Base64::scan(DbValue::Text(ENCODED.into())).unwrap(), subject);
        assert_eq!(
            Base64::scan(DbValue::Bytes(ENCODED.as_bytes().to_vec())).unwrap(),
            subject
        );
        assert!(Base64::scan(DbValue::Float(1.0)).is_err());
    }

    #[test]
    fn test_document() {
        let subject = Base64::new(PLAIN.as_bytes());
        assert_eq!(Base64::from_document(subject.to_document()).unwrap(), subject);
        assert_eq!(
            Base64::from_document(DocValue::Binary(PLAIN.as_bytes().to_vec())).unwrap(),
            subject
        );
    }
}
