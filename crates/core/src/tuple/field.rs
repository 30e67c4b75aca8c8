//! A single record field

use std::any::Any;

use crate::convert::ConverterRegistry;
use crate::error::Result;
use crate::object::Object;
use crate::value::{WireKind, WireValue};

/// One wire value with typed accessors
///
/// Fields are immutable; a tuple replaces the whole field to change a value.
/// Every typed read goes through the registry passed in and returns `None`
/// for nil.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    value: WireValue,
}

impl Field {
    /// Wrap a wire value.
    pub fn new(value: WireValue) -> Self {
        Self { value }
    }

    /// The nil field used to fill gaps.
    pub fn nil() -> Self {
        Self {
            value: WireValue::Nil,
        }
    }

    /// Encode a native value through the registry.
    pub fn from_native<T: Any>(value: &T, registry: &ConverterRegistry) -> Result<Self> {
        registry.to_wire(value).map(Self::new)
    }

    /// Underlying wire value.
    pub fn value(&self) -> &WireValue {
        &self.value
    }

    /// Consume the field, returning the wire value.
    pub fn into_value(self) -> WireValue {
        self.value
    }

    /// Wire kind of the value.
    pub fn kind(&self) -> WireKind {
        WireKind::of(&self.value)
    }

    /// Check if the field holds nil
    pub fn is_nil(&self) -> bool {
        self.value.is_nil()
    }

    /// Decode into `T` through the exact `(kind, T)` converter.
    pub fn get<T: Any>(&self, registry: &ConverterRegistry) -> Result<Option<T>> {
        if self.is_nil() {
            return Ok(None);
        }
        registry.to_native(&self.value).map(Some)
    }

    /// Decode into the default native type for the field's kind.
    pub fn as_object(&self, registry: &ConverterRegistry) -> Result<Option<Object>> {
        if self.is_nil() {
            return Ok(None);
        }
        registry.to_object(&self.value).map(Some)
    }

    /// 32-bit integer view.
    pub fn as_integer(&self, registry: &ConverterRegistry) -> Result<Option<i32>> {
        self.get(registry)
    }

    /// 64-bit integer view.
    pub fn as_long(&self, registry: &ConverterRegistry) -> Result<Option<i64>> {
        self.get(registry)
    }

    /// 64-bit float view.
    pub fn as_double(&self, registry: &ConverterRegistry) -> Result<Option<f64>> {
        self.get(registry)
    }

    /// String view.
    pub fn as_string(&self, registry: &ConverterRegistry) -> Result<Option<String>> {
        self.get(registry)
    }

    /// Boolean view.
    pub fn as_boolean(&self, registry: &ConverterRegistry) -> Result<Option<bool>> {
        self.get(registry)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::nil()
    }
}

impl From<WireValue> for Field {
    fn from(value: WireValue) -> Self {
        Self::new(value)
    }
}
