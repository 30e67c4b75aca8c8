//! Converters for plain sequences and mappings
//!
//! Both delegate element conversion back to the registry, so they follow the
//! registry's container switch: on a registry without container support they
//! fail like any other unsupported pair.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use super::{Converter, ConverterRegistry};
use crate::error::Result;
use crate::value::WireValue;

/// Array ↔ `Vec<T>`, element-wise
pub struct ListConverter<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> ListConverter<T> {
    /// Create a converter for `Vec<T>`.
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for ListConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ListConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListConverter<{}>", std::any::type_name::<T>())
    }
}

impl<T: Any> Converter<Vec<T>> for ListConverter<T> {
    fn to_native(&self, value: &WireValue, registry: &ConverterRegistry) -> Result<Vec<T>> {
        registry.to_native_list::<T>(value)
    }

    fn to_wire(&self, object: &Vec<T>, registry: &ConverterRegistry) -> Result<WireValue> {
        registry.to_wire_list(object)
    }
}

/// Map ↔ `HashMap<K, V>`, entry-wise
pub struct MapConverter<K, V> {
    marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> MapConverter<K, V> {
    /// Create a converter for `HashMap<K, V>`.
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<K, V> Default for MapConverter<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MapConverter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MapConverter<{}, {}>",
            std::any::type_name::<K>(),
            std::any::type_name::<V>()
        )
    }
}

impl<K, V> Converter<HashMap<K, V>> for MapConverter<K, V>
where
    K: Any + Eq + Hash,
    V: Any,
{
    fn to_native(
        &self,
        value: &WireValue,
        registry: &ConverterRegistry,
    ) -> Result<HashMap<K, V>> {
        registry.to_native_map::<K, V>(value)
    }

    fn to_wire(&self, object: &HashMap<K, V>, registry: &ConverterRegistry) -> Result<WireValue> {
        registry.to_wire_map(object)
    }
}
