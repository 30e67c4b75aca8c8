//! Dynamically typed native values
//!
//! [`Object`] is what a field reads as when the caller does not name a target
//! type: the registry picks the default native type for the field's wire kind.
//! It is also the element type of heterogeneous lists and maps.
//!
//! ## Default Targets
//!
//! | Wire kind | Object variant |
//! |-----------|----------------|
//! | Nil | `Nil` |
//! | Boolean | `Boolean` |
//! | Integer | `Integer` if it fits 32 bits, else `Long` |
//! | Float (32-bit) | `Float` |
//! | Float (64-bit) | `Double` |
//! | String | `String` |
//! | Binary | `Binary` |
//! | Extension (UUID) | `Uuid` |
//! | Extension (decimal) | `Decimal` |
//! | Array | `List` |
//! | Map | `Map` |
//!
//! Different variants are never equal: `Integer(1) != Long(1)`.

use rust_decimal::Decimal;
use uuid::Uuid;

/// Native value whose concrete type is chosen at runtime
#[derive(Debug, Clone)]
pub enum Object {
    /// Absent value
    Nil,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Integer(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Binary(Vec<u8>),
    /// 128-bit identifier
    Uuid(Uuid),
    /// Arbitrary-precision decimal
    Decimal(Decimal),
    /// Ordered sequence
    List(Vec<Object>),
    /// Key-unique mapping, kept in insertion order
    Map(Vec<(Object, Object)>),
}

// Map comparison ignores entry order, everything else is structural.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Nil, Object::Nil) => true,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Long(a), Object::Long(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Double(a), Object::Double(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Binary(a), Object::Binary(b)) => a == b,
            (Object::Uuid(a), Object::Uuid(b)) => a == b,
            (Object::Decimal(a), Object::Decimal(b)) => a == b,
            (Object::List(a), Object::List(b)) => a == b,
            (Object::Map(a), Object::Map(b)) => same_entries(a, b),
            _ => false,
        }
    }
}

// Each entry of `a` must claim a distinct equal entry of `b`.
fn same_entries(a: &[(Object, Object)], b: &[(Object, Object)]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut claimed = vec![false; b.len()];
    a.iter().all(|entry| {
        let found = b
            .iter()
            .enumerate()
            .position(|(i, other)| !claimed[i] && other == entry);
        match found {
            Some(i) => {
                claimed[i] = true;
                true
            }
            None => false,
        }
    })
}

impl Object {
    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Nil => "Nil",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Long(_) => "Long",
            Object::Float(_) => "Float",
            Object::Double(_) => "Double",
            Object::String(_) => "String",
            Object::Binary(_) => "Binary",
            Object::Uuid(_) => "Uuid",
            Object::Decimal(_) => "Decimal",
            Object::List(_) => "List",
            Object::Map(_) => "Map",
        }
    }

    /// Check if this is the nil value
    pub fn is_nil(&self) -> bool {
        matches!(self, Object::Nil)
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view covering both integer widths.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(i64::from(*i)),
            Object::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Get as &[Object] if this is a List value
    pub fn as_list(&self) -> Option<&[Object]> {
        match self {
            Object::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a map entry by key.
    pub fn get(&self, key: &Object) -> Option<&Object> {
        match self {
            Object::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Build a map from pairs; a repeated key keeps the last value.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Object>,
        V: Into<Object>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut out: Vec<(Object, Object)> = Vec::new();
        for (key, value) in entries {
            insert_unique(&mut out, key.into(), value.into());
        }
        Object::Map(out)
    }
}

/// Insert into a key-unique entry list, replacing an existing key in place.
pub(crate) fn insert_unique(entries: &mut Vec<(Object, Object)>, key: Object, value: Object) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Integer(i)
    }
}

impl From<i64> for Object {
    fn from(l: i64) -> Self {
        Object::Long(l)
    }
}

impl From<f32> for Object {
    fn from(f: f32) -> Self {
        Object::Float(f)
    }
}

impl From<f64> for Object {
    fn from(d: f64) -> Self {
        Object::Double(d)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_string())
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<Uuid> for Object {
    fn from(id: Uuid) -> Self {
        Object::Uuid(id)
    }
}

impl From<Decimal> for Object {
    fn from(d: Decimal) -> Self {
        Object::Decimal(d)
    }
}

impl<T: Into<Object>> From<Option<T>> for Object {
    fn from(value: Option<T>) -> Self {
        value.map_or(Object::Nil, Into::into)
    }
}

impl<T: Into<Object>> From<Vec<T>> for Object {
    fn from(items: Vec<T>) -> Self {
        Object::List(items.into_iter().map(Into::into).collect())
    }
}
