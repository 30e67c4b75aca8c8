//! Pre-built registries
//!
//! The default converter sets are built once per process and frozen into
//! shared base tables. Every factory call layers a fresh, empty local table
//! over the matching base.

use std::any::Any;
use std::hash::Hash;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::registry::ConverterTable;
use super::{
    BinaryConverter, BooleanConverter, ConverterRegistry, DecimalConverter, DoubleConverter,
    FloatConverter, IntegerConverter, LongConverter, NilConverter, StringConverter, UuidConverter,
};
use crate::object::Object;
use crate::tuple::{Tuple, TupleConverter};
use crate::value::WireKind;

static SIMPLE_BASE: Lazy<Arc<ConverterTable>> =
    Lazy::new(|| Arc::new(DefaultConverterFactory::scalars().into_table()));

static COMPLEX_BASE: Lazy<Arc<ConverterTable>> = Lazy::new(|| {
    let mut registry = DefaultConverterFactory::scalars()
        .with_converter::<Tuple, _>(WireKind::Array, TupleConverter);
    DefaultConverterFactory::containers(&mut registry);
    Arc::new(registry.into_table())
});

/// Hands out registries layered over the shared default converter sets
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverterFactory;

impl DefaultConverterFactory {
    /// Registry with the scalar converters only.
    ///
    /// Strings, integers (32 and 64 bit), binary, booleans, floats (32 and
    /// 64 bit), UUIDs, decimals and nil. Lists and maps are rejected.
    pub fn simple() -> ConverterRegistry {
        ConverterRegistry::layered(Arc::clone(&*SIMPLE_BASE), false)
    }

    /// Registry with the scalar converters, the container path and the
    /// tuple converter.
    ///
    /// `Vec<T>` is registered for every scalar type plus `Object` and
    /// `Tuple`; `HashMap<K, V>` for `String`, `&'static str`, `i32` and `i64`
    /// keys over every scalar value type plus `Object`. Other element types
    /// go through [`ConverterRegistry::register_list`] and
    /// [`ConverterRegistry::register_map`].
    pub fn complex() -> ConverterRegistry {
        ConverterRegistry::layered(Arc::clone(&*COMPLEX_BASE), true)
    }

    fn scalars() -> ConverterRegistry {
        ConverterRegistry::new()
            .with_converter::<String, _>(WireKind::String, StringConverter)
            .with_converter::<&'static str, _>(WireKind::String, StringConverter)
            .with_converter::<i32, _>(WireKind::Integer, IntegerConverter)
            .with_converter::<i64, _>(WireKind::Integer, LongConverter)
            .with_converter::<Vec<u8>, _>(WireKind::Binary, BinaryConverter)
            .with_converter::<bool, _>(WireKind::Boolean, BooleanConverter)
            .with_converter::<f32, _>(WireKind::Float, FloatConverter)
            .with_converter::<f64, _>(WireKind::Float, DoubleConverter)
            .with_converter::<Uuid, _>(WireKind::Extension, UuidConverter)
            .with_converter::<Decimal, _>(WireKind::Extension, DecimalConverter)
            .with_converter::<(), _>(WireKind::Nil, NilConverter)
    }

    fn containers(registry: &mut ConverterRegistry) {
        registry.register_list::<String>();
        registry.register_list::<&'static str>();
        registry.register_list::<i32>();
        registry.register_list::<i64>();
        registry.register_list::<f32>();
        registry.register_list::<f64>();
        registry.register_list::<bool>();
        registry.register_list::<Uuid>();
        registry.register_list::<Decimal>();
        registry.register_list::<Vec<u8>>();
        registry.register_list::<Object>();
        registry.register_list::<Tuple>();

        Self::maps_keyed_by::<String>(registry);
        Self::maps_keyed_by::<&'static str>(registry);
        Self::maps_keyed_by::<i32>(registry);
        Self::maps_keyed_by::<i64>(registry);
    }

    fn maps_keyed_by<K: Any + Eq + Hash>(registry: &mut ConverterRegistry) {
        registry.register_map::<K, String>();
        registry.register_map::<K, &'static str>();
        registry.register_map::<K, i32>();
        registry.register_map::<K, i64>();
        registry.register_map::<K, f32>();
        registry.register_map::<K, f64>();
        registry.register_map::<K, bool>();
        registry.register_map::<K, Uuid>();
        registry.register_map::<K, Decimal>();
        registry.register_map::<K, Vec<u8>>();
        registry.register_map::<K, Object>();
    }
}
