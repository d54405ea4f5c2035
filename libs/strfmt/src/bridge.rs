//! Conversion of untyped JSON values into registered format values.

use serde_json::Value;
use tracing::trace;

use crate::{FormatError, FormatValue, Registry};

/// The outcome of running a value through [`Registry::decode_hook`].
#[derive(Debug, Clone)]
pub enum Decoded {
    /// The source was a string and decoded into the registered type.
    Format(Box<dyn FormatValue>),
    /// The source was not a string, or no format is registered under the
    /// name; it is handed back for a generic decoder.
    Passthrough(Value),
}

impl Decoded {
    pub fn into_format(self) -> Option<Box<dyn FormatValue>> {
        match self {
            Decoded::Format(value) => Some(value),
            Decoded::Passthrough(_) => None,
        }
    }
}

impl Registry {
    /// Decodes a string source into a fresh value of the type registered
    /// under `name`. Any other source passes through untouched.
    pub fn decode_hook(&self, name: &str, source: Value) -> Result<Decoded, FormatError> {
        let Value::String(text) = source else {
            trace!(format = name, "passing through non-string source");
            return Ok(Decoded::Passthrough(source));
        };
        let Some(mut value) = self.prototype(name) else {
            trace!(format = name, "no format registered, passing through");
            return Ok(Decoded::Passthrough(Value::String(text)));
        };
        value.set_text(&text)?;
        trace!(format = name, value = %value, "decoded format value");
        Ok(Decoded::Format(value))
    }

    /// Decodes a JSON token into the type registered under `name`.
    ///
    /// Strings are decoded through the text codec and `null` yields the zero
    /// value. Any other token is an error.
    pub fn decode_json(&self, name: &str, source: &Value) -> Result<Box<dyn FormatValue>, FormatError> {
        let mut value = self
            .prototype(name)
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))?;
        match source {
            Value::String(text) => value.set_text(text)?,
            Value::Null => {}
            other => {
                return Err(FormatError::UnexpectedToken {
                    format: name.to_string(),
                    token: other.to_string(),
                })
            }
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, Uuid4};
    use serde_json::json;

    #[test]
    fn test_string_decodes_through_text_codec() {
        let registry = Registry::new();
        let decoded = registry.decode_hook("date", json!("2014-12-15")).unwrap();
        let value = decoded.into_format().unwrap();
        assert_eq!(value.downcast_ref::<Date>().unwrap().to_string(), "2014-12-15");
    }

    #[test]
    fn test_non_string_passes_through() {
        let registry = Registry::new();
        for source in [json!(42), json!(null), json!({"a": 1}), json!([1, 2])] {
            match registry.decode_hook("date", source.clone()).unwrap() {
                Decoded::Passthrough(v) => assert_eq!(v, source),
                Decoded::Format(v) => panic!("unexpected decode into {v:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_format_passes_through() {
        let registry = Registry::new();
        let decoded = registry.decode_hook("nope", json!("x")).unwrap();
        assert!(matches!(decoded, Decoded::Passthrough(Value::String(s)) if s == "x"));
    }

    #[test]
    fn test_invalid_string_is_an_error() {
        let registry = Registry::new();
        let err = registry.decode_hook("uuid4", json!("not-a-uuid")).unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.format_name(), "uuid4");
    }

    #[test]
    fn test_decode_json() {
        let registry = Registry::new();
        let zero = registry.decode_json("uuid4", &Value::Null).unwrap();
        assert!(zero.downcast_ref::<Uuid4>().unwrap().is_nil());

        let value = registry
            .decode_json("uuid4", &json!("025b0d74-00a2-4048-bf57-227c5111bb34"))
            .unwrap();
        assert_eq!(value.to_text(), "025b0d74-00a2-4048-bf57-227c5111bb34");

        let err = registry.decode_json("uuid4", &json!(12)).unwrap_err();
        assert!(matches!(err, FormatError::UnexpectedToken { .. }));
        assert!(matches!(
            registry.decode_json("nope", &Value::Null),
            Err(FormatError::UnknownFormat(_))
        ));
    }
}
