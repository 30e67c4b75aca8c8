//! Converters for the simple (scalar) types
//!
//! Each converter handles exactly one wire kind and one native type. Integer
//! and float converters check ranges instead of truncating.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::ext;
use super::{Converter, ConverterRegistry};
use crate::error::{Error, Result};
use crate::value::{WireKind, WireValue};

fn unexpected(value: &WireValue, target: &str) -> Error {
    Error::conversion(format!(
        "cannot read {} wire value as {}",
        WireKind::of(value),
        target
    ))
}

/// String ↔ `String`
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl Converter<String> for StringConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<String> {
        match value {
            WireValue::String(s) => s
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::conversion("string value is not valid UTF-8")),
            other => Err(unexpected(other, "String")),
        }
    }

    fn to_wire(&self, object: &String, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::from(object.as_str()))
    }
}

// String literals encode like owned strings; decoding always yields `String`.
impl Converter<&'static str> for StringConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<&'static str> {
        Err(Error::conversion(format!(
            "cannot borrow a {} wire value as &str, read it as String",
            WireKind::of(value)
        )))
    }

    fn to_wire(&self, object: &&'static str, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::from(*object))
    }
}

/// Integer ↔ `i32`
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerConverter;

impl Converter<i32> for IntegerConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<i32> {
        match value {
            WireValue::Integer(n) => n
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| Error::conversion(format!("integer {n} does not fit in i32"))),
            other => Err(unexpected(other, "i32")),
        }
    }

    fn to_wire(&self, object: &i32, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::from(*object))
    }
}

/// Integer ↔ `i64`
#[derive(Debug, Clone, Copy, Default)]
pub struct LongConverter;

impl Converter<i64> for LongConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<i64> {
        match value {
            WireValue::Integer(n) => n
                .as_i64()
                .ok_or_else(|| Error::conversion(format!("integer {n} does not fit in i64"))),
            other => Err(unexpected(other, "i64")),
        }
    }

    fn to_wire(&self, object: &i64, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::from(*object))
    }
}

/// Binary ↔ `Vec<u8>`
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryConverter;

impl Converter<Vec<u8>> for BinaryConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<Vec<u8>> {
        match value {
            WireValue::Binary(bytes) => Ok(bytes.clone()),
            other => Err(unexpected(other, "Vec<u8>")),
        }
    }

    fn to_wire(&self, object: &Vec<u8>, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::Binary(object.clone()))
    }
}

/// Boolean ↔ `bool`
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

impl Converter<bool> for BooleanConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<bool> {
        match value {
            WireValue::Boolean(b) => Ok(*b),
            other => Err(unexpected(other, "bool")),
        }
    }

    fn to_wire(&self, object: &bool, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::Boolean(*object))
    }
}

/// Float ↔ `f32`
///
/// A 64-bit wire float is accepted only when it survives the narrowing
/// unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatConverter;

impl Converter<f32> for FloatConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<f32> {
        match value {
            WireValue::F32(f) => Ok(*f),
            WireValue::F64(d) => {
                let narrowed = *d as f32;
                if f64::from(narrowed) == *d || d.is_nan() {
                    Ok(narrowed)
                } else {
                    Err(Error::conversion(format!("float {d} does not fit in f32")))
                }
            }
            other => Err(unexpected(other, "f32")),
        }
    }

    fn to_wire(&self, object: &f32, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::F32(*object))
    }
}

/// Float ↔ `f64`
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleConverter;

impl Converter<f64> for DoubleConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<f64> {
        match value {
            WireValue::F32(f) => Ok(f64::from(*f)),
            WireValue::F64(d) => Ok(*d),
            other => Err(unexpected(other, "f64")),
        }
    }

    fn to_wire(&self, object: &f64, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::F64(*object))
    }
}

/// Extension (type 2) ↔ `Uuid`
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidConverter;

impl Converter<Uuid> for UuidConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<Uuid> {
        ext::decode_uuid(value)
    }

    fn to_wire(&self, object: &Uuid, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(ext::encode_uuid(object))
    }
}

/// Extension (type 1) ↔ `Decimal`
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalConverter;

impl Converter<Decimal> for DecimalConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<Decimal> {
        ext::decode_decimal(value)
    }

    fn to_wire(&self, object: &Decimal, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(ext::encode_decimal(object))
    }
}

/// Nil ↔ `()`
///
/// The dedicated nil converter. Typed reads of nil go through the registry's
/// [`NilPolicy`](super::NilPolicy) instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NilConverter;

impl Converter<()> for NilConverter {
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<()> {
        match value {
            WireValue::Nil => Ok(()),
            other => Err(unexpected(other, "()")),
        }
    }

    fn to_wire(&self, _: &(), _: &ConverterRegistry) -> Result<WireValue> {
        Ok(WireValue::Nil)
    }
}
