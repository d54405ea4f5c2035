//! # strfmt
//!
//! Named string formats for schema-driven tooling: validators, typed values
//! and a runtime-extensible registry.
//!
//! ## Design Principles
//!
//! - Validators are infallible predicates; bad input is `false`, never a panic
//! - Every value type has a single canonical text form and strict parsing
//! - Values round-trip through text, JSON, relational and document codecs
//! - Codec behaviour that varies per store is injected through [`CodecOptions`]
//!
//! ## Registry
//!
//! A [`Registry`] maps a normalized format name to a validator and a zero-value
//! prototype. Names are compared after removing everything but ASCII letters and
//! digits and folding case, so `date-time` and `datetime` are the same format.
//!
//! ```ignore
//! use strfmt::{default_registry, Password};
//!
//! let registry = default_registry();
//! assert!(registry.validates("email", "someone@example.com"));
//! assert!(!registry.validates("no-such-format", "anything"));
//!
//! // Adding over an existing name replaces it and reports false.
//! assert!(registry.add("tf2", Password::default(), |s: &str| s.starts_with("af")));
//! assert!(!registry.add("tf2", Password::default(), |s: &str| s.starts_with("bf")));
//! assert!(registry.validates("tf2", "bfa"));
//! ```
//!
//! ## Value Types
//!
//! | Format         | Type          | Backing              |
//! |----------------|---------------|----------------------|
//! | `date`         | [`Date`]      | calendar date        |
//! | `date-time`    | [`DateTime`]  | instant with offset  |
//! | `duration`     | [`Duration`]  | signed nanoseconds   |
//! | `uuid`, `uuid3`, `uuid4`, `uuid5`, `uuid7` | [`Uuid`], [`Uuid3`], ... | 16 bytes |
//! | `ulid`         | [`Ulid`]      | 16 bytes             |
//! | `byte`         | [`Base64`]    | decoded bytes        |
//! | `bsonobjectid` | [`ObjectId`]  | 12 bytes             |
//! | everything else | [`Email`], [`Hostname`], ... | validated text |

mod bridge;
mod byte;
mod checksum;
mod date;
mod datetime;
pub mod document;
mod duration;
mod email;
mod error;
mod hostname;
mod macros;
mod network;
mod object_id;
pub mod options;
mod pattern;
mod registry;
pub mod sql;
mod types;
mod ulids;
mod uri;
mod uuids;
mod value;

pub use bridge::Decoded;
pub use byte::Base64;
pub use date::Date;
pub use datetime::{DateTime, WithOptions};
pub use document::{DocValue, DocumentCodec};
pub use duration::Duration;
pub use error::FormatError;
pub use object_id::ObjectId;
pub use options::{BinaryUlidStrategy, CodecOptions, TextUlidStrategy, UlidSqlStrategy};
pub use registry::{default_registry, normalize_name, FormatEntry, Registry, Validator};
pub use sql::{DbValue, SqlCodec, SqlScan, SqlValue};
pub use types::*;
pub use ulids::Ulid;
pub use uuids::{Uuid, Uuid3, Uuid4, Uuid5, Uuid7};
pub use value::{FormatValue, TextCodec};

/// Validator predicates for every built-in format.
pub mod validate {
    pub use crate::checksum::{is_credit_card, is_isbn, is_isbn10, is_isbn13, is_ssn, luhn};
    pub use crate::date::is_date;
    pub use crate::datetime::is_datetime;
    pub use crate::duration::is_duration;
    pub use crate::email::is_email;
    pub use crate::hostname::{decode_punycode, is_hostname};
    pub use crate::network::{is_cidr, is_ipv4, is_ipv6, is_mac};
    pub use crate::object_id::is_object_id;
    pub use crate::pattern::{is_base64, is_hex_color, is_password, is_rgb_color};
    pub use crate::ulids::is_ulid;
    pub use crate::uri::is_uri;
    pub use crate::uuids::{is_uuid, is_uuid3, is_uuid4, is_uuid5, is_uuid7};
}
