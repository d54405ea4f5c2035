//! UUID formats: any RFC 4122 UUID, and the version 3, 4, 5 and 7 subsets.
//!
//! Text input is 32 hex digits, either ungrouped or hyphenated `8-4-4-4-12`.
//! Output is always hyphenated lower case. The zero value is the nil UUID.

use std::fmt;
use std::str::FromStr;

use uuid::Variant;

use crate::document::{self, DocValue, DocumentCodec};
use crate::sql::{self, DbValue, SqlScan, SqlValue};
use crate::{CodecOptions, FormatError, TextCodec};

fn parse_any(s: &str) -> Option<uuid::Uuid> {
    if s.len() != 32 && s.len() != 36 {
        return None;
    }
    uuid::Uuid::try_parse(s).ok()
}

fn any_version(_: &uuid::Uuid) -> bool {
    true
}

fn has_version(u: &uuid::Uuid, version: usize) -> bool {
    u.get_version_num() == version && u.get_variant() == Variant::RFC4122
}

fn is_version3(u: &uuid::Uuid) -> bool {
    has_version(u, 3)
}

fn is_version4(u: &uuid::Uuid) -> bool {
    has_version(u, 4)
}

fn is_version5(u: &uuid::Uuid) -> bool {
    has_version(u, 5)
}

fn is_version7(u: &uuid::Uuid) -> bool {
    has_version(u, 7)
}

/// Any UUID in canonical or ungrouped hex form.
pub fn is_uuid(s: &str) -> bool {
    parse_any(s).is_some()
}

/// A name-based MD5 UUID.
pub fn is_uuid3(s: &str) -> bool {
    parse_any(s).is_some_and(|u| is_version3(&u))
}

/// A random UUID.
pub fn is_uuid4(s: &str) -> bool {
    parse_any(s).is_some_and(|u| is_version4(&u))
}

/// A name-based SHA-1 UUID.
pub fn is_uuid5(s: &str) -> bool {
    parse_any(s).is_some_and(|u| is_version5(&u))
}

/// A time-ordered UUID.
pub fn is_uuid7(s: &str) -> bool {
    parse_any(s).is_some_and(|u| is_version7(&u))
}

macro_rules! define_uuid {
    ($(#[$meta:meta])* $name:ident, $format:literal, $check:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// The registry name of this format.
            pub const FORMAT: &'static str = $format;

            /// Parses a UUID, rejecting other versions and empty input.
            pub fn parse(s: &str) -> Result<Self, FormatError> {
                parse_any(s)
                    .filter($check)
                    .map(Self)
                    .ok_or_else(|| FormatError::invalid(Self::FORMAT, s))
            }

            /// Wraps a UUID after checking its version.
            pub fn from_uuid(u: uuid::Uuid) -> Result<Self, FormatError> {
                if $check(&u) {
                    Ok(Self(u))
                } else {
                    Err(FormatError::invalid(Self::FORMAT, u.to_string()))
                }
            }

            /// The nil UUID.
            pub const fn nil() -> Self {
                Self(uuid::Uuid::nil())
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// Decodes codec input: empty text and the nil UUID are the zero value.
            fn decode(text: &str) -> Result<Self, FormatError> {
                if text.is_empty() || parse_any(text).is_some_and(|u| u.is_nil()) {
                    return Ok(Self::nil());
                }
                Self::parse(text)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = FormatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TextCodec for $name {
            fn unmarshal_text(text: &str) -> Result<Self, FormatError> {
                Self::decode(text)
            }

            fn marshal_text(&self) -> String {
                self.to_string()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
                    Some(s) => Self::unmarshal_text(&s).map_err(serde::de::Error::custom),
                    None => Ok(Self::nil()),
                }
            }
        }

        impl SqlScan for $name {
            fn scan_with(src: DbValue, _options: &CodecOptions) -> Result<Self, FormatError> {
                match sql::scan_text(src, Self::FORMAT)? {
                    Some(text) => Self::decode(&text),
                    None => Ok(Self::nil()),
                }
            }
        }

        impl SqlValue for $name {
            fn value_with(&self, _options: &CodecOptions) -> Result<DbValue, FormatError> {
                Ok(DbValue::Text(self.to_string()))
            }
        }

        impl DocumentCodec for $name {
            fn to_document(&self) -> DocValue {
                DocValue::String(self.to_string())
            }

            fn from_document(value: DocValue) -> Result<Self, FormatError> {
                match document::expect_string(value, Self::FORMAT)? {
                    Some(text) => Self::decode(&text),
                    None => Ok(Self::nil()),
                }
            }
        }
    };
}

define_uuid!(
    /// A UUID of any version or variant.
    Uuid, "uuid", any_version
);
define_uuid!(
    /// A version 3 (MD5 name-based) UUID.
    Uuid3, "uuid3", is_version3
);
define_uuid!(
    /// A version 4 (random) UUID.
    Uuid4, "uuid4", is_version4
);
define_uuid!(
    /// A version 5 (SHA-1 name-based) UUID.
    Uuid5, "uuid5", is_version5
);
define_uuid!(
    /// A version 7 (Unix-time ordered) UUID.
    Uuid7, "uuid7", is_version7
);

impl Uuid {
    pub fn new(u: uuid::Uuid) -> Self {
        Self(u)
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(u: uuid::Uuid) -> Self {
        Self(u)
    }
}

impl Uuid3 {
    /// Derives the UUID for `name` within `namespace`.
    pub fn new_md5(namespace: &uuid::Uuid, name: &[u8]) -> Self {
        Self(uuid::Uuid::new_v3(namespace, name))
    }
}

impl Uuid4 {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Uuid5 {
    /// Derives the UUID for `name` within `namespace`.
    pub fn new_sha1(namespace: &uuid::Uuid, name: &[u8]) -> Self {
        Self(uuid::Uuid::new_v5(namespace, name))
    }
}

impl Uuid7 {
    /// A new UUID for the current time.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}
