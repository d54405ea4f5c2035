//! The format registry: a directory of named validators and prototypes.
//!
//! Names are normalized before every lookup, so `date-time`, `DateTime` and
//! `datetime` all refer to the same entry.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use crate::byte::Base64;
use crate::checksum::{is_credit_card, is_isbn, is_isbn10, is_isbn13, is_ssn};
use crate::date::{is_date, Date};
use crate::datetime::{is_datetime, DateTime};
use crate::duration::{is_duration, Duration};
use crate::email::is_email;
use crate::hostname::is_hostname;
use crate::network::{is_cidr, is_ipv4, is_ipv6, is_mac};
use crate::object_id::{is_object_id, ObjectId};
use crate::pattern::{is_base64, is_hex_color, is_password, is_rgb_color};
use crate::types::{
    Cidr, CreditCard, Email, HexColor, Hostname, Ipv4, Ipv6, Isbn, Isbn10, Isbn13, Mac, Password,
    RgbColor, Ssn, Uri,
};
use crate::ulids::{is_ulid, Ulid};
use crate::uri::is_uri;
use crate::uuids::{is_uuid, is_uuid3, is_uuid4, is_uuid5, is_uuid7, Uuid, Uuid3, Uuid4, Uuid5, Uuid7};
use crate::{FormatError, FormatValue};

/// A format predicate.
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Removes everything outside `[A-Za-z0-9]` and lowercases the rest.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A registered format.
#[derive(Clone)]
pub struct FormatEntry {
    name: Arc<str>,
    validator: Validator,
    prototype: Arc<dyn FormatValue>,
}

impl FormatEntry {
    /// The normalized name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validates(&self, value: &str) -> bool {
        (self.validator)(value)
    }

    /// A fresh zero value of the registered type.
    pub fn new_value(&self) -> Box<dyn FormatValue> {
        self.prototype.new_zero()
    }
}

impl fmt::Debug for FormatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatEntry")
            .field("name", &self.name)
            .field("prototype", &self.prototype)
            .finish_non_exhaustive()
    }
}

/// A concurrent directory of formats keyed by normalized name.
///
/// Lookups take a shared lock only long enough to clone the entry out, so a
/// slow validator never blocks registration.
pub struct Registry {
    entries: RwLock<HashMap<String, FormatEntry>>,
}

impl Registry {
    /// A registry with no formats.
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A registry holding every built-in format.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register_builtins();
        registry
    }

    /// An independent copy of the current entries.
    pub fn snapshot(&self) -> Self {
        Self {
            entries: RwLock::new(self.entries.read().clone()),
        }
    }

    /// Registers `validator` and `prototype` under `name`.
    ///
    /// Returns true for a first registration. An existing entry is replaced
    /// and false is returned.
    pub fn add<P, F>(&self, name: &str, prototype: P, validator: F) -> bool
    where
        P: FormatValue,
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let key = normalize_name(name);
        let entry = FormatEntry {
            name: Arc::from(key.as_str()),
            validator: Arc::new(validator),
            prototype: Arc::new(prototype),
        };
        let replaced = self.entries.write().insert(key, entry).is_some();
        if replaced {
            debug!(format = name, "replaced format");
        } else {
            debug!(format = name, "registered format");
        }
        !replaced
    }

    /// Returns true if a format is registered under `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.read().contains_key(&normalize_name(name))
    }

    /// Removes the format registered under `name`, returning whether one existed.
    pub fn del_by_name(&self, name: &str) -> bool {
        let removed = self.entries.write().remove(&normalize_name(name)).is_some();
        if removed {
            debug!(format = name, "removed format");
        }
        removed
    }

    /// Runs the validator registered under `name`. Unknown names never validate.
    pub fn validates(&self, name: &str, value: &str) -> bool {
        match self.lookup(name) {
            Some(entry) => entry.validates(value),
            None => false,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<FormatEntry> {
        self.entries.read().get(&normalize_name(name)).cloned()
    }

    /// A fresh zero value of the type registered under `name`.
    pub fn prototype(&self, name: &str) -> Option<Box<dyn FormatValue>> {
        self.lookup(name).map(|entry| entry.new_value())
    }

    /// Decodes `text` into the type registered under `name`.
    pub fn parse(&self, name: &str, text: &str) -> Result<Box<dyn FormatValue>, FormatError> {
        let entry = self
            .lookup(name)
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))?;
        if !entry.validates(text) {
            return Err(FormatError::invalid(entry.name(), text));
        }
        let mut value = entry.new_value();
        value.set_text(text)?;
        Ok(value)
    }

    /// Sorted normalized names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Validates each `(name, value)` pair and returns the ones that fail.
    pub fn validate_all<'a, I>(&self, items: I) -> Vec<(&'a str, &'a str)>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        items
            .into_iter()
            .filter(|(name, value)| !self.validates(name, value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn register_builtins(&self) {
        self.add(Date::FORMAT, Date::default(), is_date);
        self.add(DateTime::FORMAT, DateTime::default(), is_datetime);
        self.add(Duration::FORMAT, Duration::default(), is_duration);
        self.add(Uri::FORMAT, Uri::default(), is_uri);
        self.add(Email::FORMAT, Email::default(), is_email);
        self.add(Hostname::FORMAT, Hostname::default(), is_hostname);
        self.add(Ipv4::FORMAT, Ipv4::default(), is_ipv4);
        self.add(Ipv6::FORMAT, Ipv6::default(), is_ipv6);
        self.add(Cidr::FORMAT, Cidr::default(), is_cidr);
        self.add(Mac::FORMAT, Mac::default(), is_mac);
        self.add(Uuid::FORMAT, Uuid::default(), is_uuid);
        self.add(Uuid3::FORMAT, Uuid3::default(), is_uuid3);
        self.add(Uuid4::FORMAT, Uuid4::default(), is_uuid4);
        self.add(Uuid5::FORMAT, Uuid5::default(), is_uuid5);
        self.add(Uuid7::FORMAT, Uuid7::default(), is_uuid7);
        self.add(Ulid::FORMAT, Ulid::default(), is_ulid);
        self.add(Isbn::FORMAT, Isbn::default(), is_isbn);
        self.add(Isbn10::FORMAT, Isbn10::default(), is_isbn10);
        self.add(Isbn13::FORMAT, Isbn13::default(), is_isbn13);
        self.add(CreditCard::FORMAT, CreditCard::default(), is_credit_card);
        self.add(Ssn::FORMAT, Ssn::default(), is_ssn);
        self.add(HexColor::FORMAT, HexColor::default(), is_hex_color);
        self.add(RgbColor::FORMAT, RgbColor::default(), is_rgb_color);
        self.add(Base64::FORMAT, Base64::default(), is_base64);
        self.add(Password::FORMAT, Password::default(), is_password);
        self.add(ObjectId::FORMAT, ObjectId::default(), is_object_id);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

static DEFAULT_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, populated with the built-in formats on first use.
pub fn default_registry() -> &'static Registry {
    DEFAULT_REGISTRY.get_or_init(Registry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("test-format", "testformat")]
    #[case("date-time", "datetime")]
    #[case("UUID_4", "uuid4")]
    #[case("bson objectid", "bsonobjectid")]
    #[case("--", "")]
    fn test_normalize_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_name(input), expected);
    }

    #[test]
    fn test_builtin_names() {
        let registry = Registry::new();
        for name in [
            "date", "datetime", "date-time", "duration", "uri", "email", "hostname", "ipv4",
            "ipv6", "cidr", "mac", "uuid", "uuid3", "uuid4", "uuid5", "uuid7", "ulid", "isbn",
            "isbn10", "isbn13", "creditcard", "ssn", "hexcolor", "rgbcolor", "byte", "password",
            "bsonobjectid",
        ] {
            assert!(registry.contains_name(name), "{name} should be registered");
        }
        assert_eq!(registry.len(), 26);
        assert!(Registry::empty().is_empty());
    }

    #[rstest]
    #[case("email", "somebody@somewhere.com", true)]
    #[case("email", "somebody", false)]
    #[case("hostname", "a.com", true)]
    #[case("uuid4", "025b0d74-00a2-4048-bf57-227c5111bb34", true)]
    #[case("uuid3", "025b0d74-00a2-4048-bf57-227c5111bb34", false)]
    #[case("ulid", "7ZZZZZZZZZZZZZZZZZZZZZZZZZ", true)]
    #[case("isbn", "0321751043", true)]
    #[case("duration", "3 days", true)]
    #[case("date-time", "2014-12-15T08:00:00Z", true)]
    #[case("nope", "anything", false)]
    fn test_validates(#[case] name: &str, #[case] value: &str, #[case] valid: bool) {
        assert_eq!(Registry::new().validates(name, value), valid);
    }

    #[test]
    fn test_parse_and_prototype() {
        let registry = Registry::new();
        let value = registry.parse("uuid", "a8098c1a-f86e-11da-bd1a-00112444be1e").unwrap();
        assert_eq!(value.to_text(), "a8098c1a-f86e-11da-bd1a-00112444be1e");
        assert!(value.downcast_ref::<Uuid>().is_some());

        let zero = registry.prototype("date").unwrap();
        assert_eq!(zero.to_text(), "1970-01-01");

        assert_eq!(
            registry.parse("nope", "x").unwrap_err(),
            FormatError::UnknownFormat("nope".to_string())
        );
        assert!(registry.parse("email", "").unwrap_err().is_invalid());
        assert!(registry.prototype("nope").is_none());
    }

    #[test]
    fn test_lookups_share_entry_storage() {
        let registry = Registry::new();
        let first = registry.lookup("email").unwrap();
        let second = registry.lookup("e-mail").unwrap();
        assert!(Arc::ptr_eq(&first.name, &second.name));
        assert!(Arc::ptr_eq(&first.validator, &second.validator));
        assert_eq!(first.name(), "email");
    }

    #[test]
    fn test_snapshot_is_independent() {
        let original = Registry::new();
        let copy = original.snapshot();
        assert!(copy.del_by_name("email"));
        assert!(original.contains_name("email"));
        assert!(!copy.contains_name("email"));
    }

    #[test]
    fn test_validate_all() {
        let registry = Registry::new();
        let failures = registry.validate_all([
            ("email", "somebody@somewhere.com"),
            ("ipv4", "256.0.0.1"),
            ("unknown", "x"),
        ]);
        assert_eq!(failures, vec![("ipv4", "256.0.0.1"), ("unknown", "x")]);
    }

    #[test]
    fn test_names_sorted() {
        let registry = Registry::empty();
        registry.add("zeta", Password::default(), |_| true);
        registry.add("Alpha-One", Password::default(), |_| true);
        assert_eq!(registry.names(), vec!["alphaone", "zeta"]);
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let name = format!("custom{i}");
                    for _ in 0..100 {
                        registry.add(&name, Password::default(), |s: &str| s.starts_with('c'));
                        assert!(registry.validates("email", "a@b.co"));
                        registry.del_by_name(&name);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 26);
    }

    #[test]
    fn test_default_registry_is_shared() {
        assert!(std::ptr::eq(default_registry(), default_registry()));
        assert!(default_registry().contains_name("uuid7"));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(name in ".{0,32}") {
            let once = normalize_name(&name);
            prop_assert_eq!(normalize_name(&once), once.clone());
            prop_assert!(once.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }
}
