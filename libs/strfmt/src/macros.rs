//! Macros for defining string-backed format types.

/// Macro to define a string-backed format type checked by a validator.
///
/// This generates a newtype wrapper around `String` with:
/// - A `FORMAT` constant holding the registry name
/// - `parse()` for strict parsing (empty input is rejected)
/// - `Display`, `FromStr` and `AsRef<str>` implementations
/// - A [`TextCodec`](crate::TextCodec) where empty text decodes to the zero value
/// - `Serialize` and `Deserialize` (JSON `null` decodes to the zero value)
/// - Relational ([`SqlScan`](crate::SqlScan), [`SqlValue`](crate::SqlValue))
///   and document ([`DocumentCodec`](crate::DocumentCodec)) codecs via the text form
///
/// # Example
///
/// ```ignore
/// define_string_format!(
///     /// An RFC5322 mailbox address.
///     Email, "email", crate::email::is_email
/// );
///
/// let email: Email = "someone@example.com".parse()?;
/// ```
#[macro_export]
macro_rules! define_string_format {
    ($(#[$meta:meta])* $name:ident, $format:literal, $validator:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// The registry name of this format.
            pub const FORMAT: &'static str = $format;

            /// Parses a value, rejecting anything the validator refuses.
            pub fn parse(s: &str) -> Result<Self, $crate::FormatError> {
                if $validator(s) {
                    Ok(Self(s.to_string()))
                } else {
                    Err($crate::FormatError::Invalid {
                        format: Self::FORMAT.to_string(),
                        value: s.to_string(),
                    })
                }
            }

            /// Returns the text of the value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true for the zero value.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consumes the value, returning its text.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::FormatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl $crate::TextCodec for $name {
            fn unmarshal_text(text: &str) -> Result<Self, $crate::FormatError> {
                if text.is_empty() {
                    return Ok(Self::default());
                }
                Self::parse(text)
            }

            fn marshal_text(&self) -> String {
                self.0.clone()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                match Option::<String>::deserialize(deserializer)? {
                    Some(s) => {
                        <Self as $crate::TextCodec>::unmarshal_text(&s)
                            .map_err(serde::de::Error::custom)
                    }
                    None => Ok(Self::default()),
                }
            }
        }

        impl $crate::SqlScan for $name {
            fn scan_with(
                src: $crate::DbValue,
                _options: &$crate::CodecOptions,
            ) -> Result<Self, $crate::FormatError> {
                match $crate::sql::scan_text(src, Self::FORMAT)? {
                    Some(text) => <Self as $crate::TextCodec>::unmarshal_text(&text),
                    None => Ok(Self::default()),
                }
            }
        }

        impl $crate::SqlValue for $name {
            fn value_with(
                &self,
                _options: &$crate::CodecOptions,
            ) -> Result<$crate::DbValue, $crate::FormatError> {
                Ok($crate::DbValue::Text(self.0.clone()))
            }
        }

        impl $crate::DocumentCodec for $name {
            fn to_document(&self) -> $crate::DocValue {
                $crate::DocValue::String(self.0.clone())
            }

            fn from_document(value: $crate::DocValue) -> Result<Self, $crate::FormatError> {
                match $crate::document::expect_string(value, Self::FORMAT)? {
                    Some(text) => <Self as $crate::TextCodec>::unmarshal_text(&text),
                    None => Ok(Self::default()),
                }
            }
        }
    };
}
