//! Wire value vocabulary
//!
//! The database exchanges self-describing MessagePack values. This module
//! names that value model and classifies it:
//! - [`WireValue`]: the immutable wire value (an `rmpv::Value`)
//! - [`WireKind`]: the nine kinds converters are keyed by
//!
//! ## Kind Rules
//!
//! - 32-bit and 64-bit floats are both kind `Float`
//! - Extension values carry their extension type; converters for the
//!   `Extension` kind check it themselves
//! - Kinds never widen into each other: `Integer` is not `Float`,
//!   `Binary` is not `String`

use std::fmt;

/// Wire value exchanged with the database.
pub type WireValue = rmpv::Value;

/// MessagePack extension type of the 128-bit identifier (UUID).
pub const UUID_EXT_TYPE: i8 = 2;

/// MessagePack extension type of the arbitrary-precision decimal.
pub const DECIMAL_EXT_TYPE: i8 = 1;

/// Kind of a [`WireValue`]; the first half of every converter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireKind {
    /// Nil
    Nil,
    /// Boolean
    Boolean,
    /// Signed or unsigned integer
    Integer,
    /// 32-bit or 64-bit float
    Float,
    /// UTF-8 string
    String,
    /// Raw binary
    Binary,
    /// Typed extension payload
    Extension,
    /// Ordered sequence of values
    Array,
    /// Key/value pairs
    Map,
}

impl WireKind {
    /// Classify a wire value.
    pub fn of(value: &WireValue) -> Self {
        match value {
            WireValue::Nil => WireKind::Nil,
            WireValue::Boolean(_) => WireKind::Boolean,
            WireValue::Integer(_) => WireKind::Integer,
            WireValue::F32(_) | WireValue::F64(_) => WireKind::Float,
            WireValue::String(_) => WireKind::String,
            WireValue::Binary(_) => WireKind::Binary,
            WireValue::Ext(_, _) => WireKind::Extension,
            WireValue::Array(_) => WireKind::Array,
            WireValue::Map(_) => WireKind::Map,
        }
    }

    /// Get the kind name as a string
    pub fn name(&self) -> &'static str {
        match self {
            WireKind::Nil => "Nil",
            WireKind::Boolean => "Boolean",
            WireKind::Integer => "Integer",
            WireKind::Float => "Float",
            WireKind::String => "String",
            WireKind::Binary => "Binary",
            WireKind::Extension => "Extension",
            WireKind::Array => "Array",
            WireKind::Map => "Map",
        }
    }

    /// Array and Map are the structural container kinds.
    pub fn is_container(&self) -> bool {
        matches!(self, WireKind::Array | WireKind::Map)
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_scalars() {
        assert_eq!(WireKind::of(&WireValue::Nil), WireKind::Nil);
        assert_eq!(WireKind::of(&WireValue::from(true)), WireKind::Boolean);
        assert_eq!(WireKind::of(&WireValue::from(-5)), WireKind::Integer);
        assert_eq!(WireKind::of(&WireValue::from(u64::MAX)), WireKind::Integer);
        assert_eq!(WireKind::of(&WireValue::from("x")), WireKind::String);
        assert_eq!(WireKind::of(&WireValue::Binary(vec![1, 2])), WireKind::Binary);
    }

    #[test]
    fn test_both_float_widths_are_float() {
        assert_eq!(WireKind::of(&WireValue::F32(1.5)), WireKind::Float);
        assert_eq!(WireKind::of(&WireValue::F64(1.5)), WireKind::Float);
    }

    #[test]
    fn test_kind_of_containers() {
        let array = WireValue::Array(vec![WireValue::Nil]);
        let map = WireValue::Map(vec![(WireValue::from("k"), WireValue::from(1))]);
        assert_eq!(WireKind::of(&array), WireKind::Array);
        assert_eq!(WireKind::of(&map), WireKind::Map);
        assert!(WireKind::Array.is_container());
        assert!(WireKind::Map.is_container());
        assert!(!WireKind::Extension.is_container());
    }

    #[test]
    fn test_kind_of_extension() {
        let ext = WireValue::Ext(UUID_EXT_TYPE, vec![0; 16]);
        assert_eq!(WireKind::of(&ext), WireKind::Extension);
        assert_eq!(WireKind::Extension.to_string(), "Extension");
    }
}
