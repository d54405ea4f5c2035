//! Capabilities shared by every format value.
//!
//! [`TextCodec`] is what a concrete type implements; [`FormatValue`] is the
//! object-safe view the registry and decode bridge work with. Every
//! `TextCodec + Default + Clone` type is a `FormatValue` automatically, so a
//! custom format only has to provide its text codec.

use std::any::Any;
use std::fmt;

use crate::FormatError;

/// Text encoding of a format value.
pub trait TextCodec: Sized {
    /// Decodes the text form. Empty text decodes to the zero value.
    fn unmarshal_text(text: &str) -> Result<Self, FormatError>;

    /// Encodes the canonical text form.
    fn marshal_text(&self) -> String;
}

/// Object-safe view of a format value, as stored in a registry.
pub trait FormatValue: fmt::Debug + Send + Sync + 'static {
    /// Canonical text form of the current value.
    fn to_text(&self) -> String;

    /// Replaces the current value by decoding `text`.
    fn set_text(&mut self, text: &str) -> Result<(), FormatError>;

    /// A fresh zero value of the same concrete type.
    fn new_zero(&self) -> Box<dyn FormatValue>;

    fn clone_box(&self) -> Box<dyn FormatValue>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> FormatValue for T
where
    T: TextCodec + Default + Clone + fmt::Debug + Send + Sync + 'static,
{
    fn to_text(&self) -> String {
        self.marshal_text()
    }

    fn set_text(&mut self, text: &str) -> Result<(), FormatError> {
        *self = T::unmarshal_text(text)?;
        Ok(())
    }

    fn new_zero(&self) -> Box<dyn FormatValue> {
        Box::new(T::default())
    }

    fn clone_box(&self) -> Box<dyn FormatValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn FormatValue {
    /// Returns the concrete value if it is a `T`.
    pub fn downcast_ref<T: FormatValue>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Unboxes the concrete value, handing the box back if it is not a `T`.
    pub fn downcast<T: FormatValue>(self: Box<Self>) -> Result<T, Box<dyn FormatValue>> {
        if !self.as_any().is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type checked above"),
        }
    }
}

impl Clone for Box<dyn FormatValue> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl fmt::Display for dyn FormatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
