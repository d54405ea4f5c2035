//! The `bsonobjectid` format: a 12-byte document-store object id.

use std::fmt;
use std::str::FromStr;

use crate::document::{self, DocValue, DocumentCodec};
use crate::sql::{self, DbValue, SqlScan, SqlValue};
use crate::{CodecOptions, FormatError, TextCodec};

/// Returns true if `s` is 24 hex digits.
pub fn is_object_id(s: &str) -> bool {
    s.len() == 24 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A 12-byte object id, written as 24 lower-case hex digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// The registry name of this format.
    pub const FORMAT: &'static str = "bsonobjectid";

    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn parse(s: &str) -> Result<Self, FormatError> {
        if !is_object_id(s) {
            return Err(FormatError::invalid(Self::FORMAT, s));
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| FormatError::invalid(Self::FORMAT, s))?;
        Ok(Self(bytes))
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 12]
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TextCodec for ObjectId {
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

impl serde::Serialize for ObjectId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ObjectId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
            Some(s) => Self::unmarshal_text(&s).map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

impl SqlScan for ObjectId {
    fn scan_with(src: DbValue, _options: &CodecOptions) -> Result<Self, FormatError> {
        match src {
            DbValue::Bytes(bytes) if bytes.len() == 12 => {
                let mut raw = [0u8; 12];
                raw.copy_from_slice(&bytes);
                Ok(Self(raw))
            }
            other => match sql::scan_text(other, Self::FORMAT)? {
                Some(text) => Self::parse(&text),
                None => Ok(Self::default()),
            },
        }
    }
}

impl SqlValue for ObjectId {
    fn value_with(&self, _options: &CodecOptions) -> Result<DbValue, FormatError> {
        Ok(DbValue::Text(self.to_string()))
    }
}

impl DocumentCodec for ObjectId {
    fn to_document(&self) -> DocValue {
        DocValue::ObjectId(self.0)
    }

    fn from_document(value: DocValue) -> Result<Self, FormatError> {
        match value {
            DocValue::ObjectId(bytes) => Ok(Self(bytes)),
            other => match document::expect_string(other, Self::FORMAT)? {
                Some(text) => Self::parse(&text),
                None => Ok(Self::default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "507f1f77bcf86cd799439011";

    #[test]
    fn test_parse() {
        let id = ObjectId::parse(HEX).unwrap();
        assert_eq!(id.to_string(), HEX);
        assert_eq!(id.bytes()[0], 0x50);
        assert_eq!(ObjectId::parse(&HEX.to_uppercase()).unwrap(), id);
        assert!(ObjectId::parse("507f1f77bcf86cd79943901").is_err());
        assert!(ObjectId::parse("507f1f77bcf86cd79943901z").is_err());
        assert!(ObjectId::parse("").is_err());
    }

    #[test]
    fn test_text_empty_is_zero() {
        assert!(ObjectId::unmarshal_text("").unwrap().is_zero());
    }

    #[test]
    fn test_json() {
        let id = ObjectId::parse(HEX).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{HEX}\""));
        assert_eq!(serde_json::from_str::<ObjectId>(&json).unwrap(), id);
    }

    #[test]
    fn test_sql() {
        let id = ObjectId::parse(HEX).unwrap();
        let stored = id.value().unwrap();
        assert_eq!(stored, DbValue::Text(HEX.to_string()));
        assert_eq!(ObjectId::scan(stored).unwrap(), id);
        assert_eq!(ObjectId::scan(DbValue::Bytes(id.bytes().to_vec())).unwrap(), id);
        assert_eq!(ObjectId::scan(DbValue::Null).unwrap(), ObjectId::default());
        assert!(ObjectId::scan(DbValue::Int(7)).is_err());
    }

    #[test]
    fn test_document_uses_native_object_id() {
        let id = ObjectId::parse(HEX).unwrap();
        let doc = id.to_document();
        assert_eq!(doc, DocValue::ObjectId(id.bytes()));
        assert_eq!(ObjectId::from_document(doc).unwrap(), id);
        assert_eq!(ObjectId::from_document(DocValue::String(HEX.into())).unwrap(), id);
    }
}
