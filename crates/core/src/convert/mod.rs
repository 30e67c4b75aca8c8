//! Typed conversion between wire values and native values
//!
//! Conversion is driven by exact-pair dispatch:
//! - Decoding looks up the converter registered for
//!   `(WireKind::of(value), TypeId::of::<T>())`
//! - Encoding looks up the converter registered for `TypeId::of::<T>()`
//!
//! There is no inheritance walk and no implicit widening. A pair without a
//! registered converter fails with [`Error::NoConverterFound`](crate::Error),
//! The structural containers (`Vec<T>` and `HashMap<K, V>`) are ordinary
//! pairs too: [`ListConverter`] and [`MapConverter`] convert them element-wise
//! on a registry with container support, and the complex registry registers
//! them for every default scalar type.

mod containers;
mod defaults;
pub mod ext;
mod factory;
mod registry;
mod serde_bridge;

use std::any::{type_name, Any};
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::value::WireValue;

pub use containers::{ListConverter, MapConverter};
pub use defaults::{
    BinaryConverter, BooleanConverter, DecimalConverter, DoubleConverter, FloatConverter,
    IntegerConverter, LongConverter, NilConverter, StringConverter, UuidConverter,
};
pub use factory::DefaultConverterFactory;
pub use registry::{ConverterRegistry, NilPolicy};
pub use serde_bridge::SerdeConverter;

/// A stateless bidirectional bridge between one wire kind and one native type.
///
/// The registry passes itself to both directions so converters for
/// composite types can delegate element conversion back to it.
pub trait Converter<T>: Send + Sync + 'static {
    /// Decode a wire value of the registered kind.
    fn to_native(&self, value: &WireValue, registry: &ConverterRegistry) -> Result<T>;

    /// Encode a native value.
    fn to_wire(&self, object: &T, registry: &ConverterRegistry) -> Result<WireValue>;
}

/// Object-safe form of [`Converter`] stored in the registry tables.
pub(crate) trait ErasedConverter: Send + Sync {
    fn to_native_any(&self, value: &WireValue, registry: &ConverterRegistry)
        -> Result<Box<dyn Any>>;

    fn to_wire_any(&self, object: &dyn Any, registry: &ConverterRegistry) -> Result<WireValue>;
}

pub(crate) struct TypedConverter<T, C> {
    inner: C,
    marker: PhantomData<fn() -> T>,
}

impl<T, C> TypedConverter<T, C> {
    pub(crate) fn new(inner: C) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T: Any, C: Converter<T>> ErasedConverter for TypedConverter<T, C> {
    fn to_native_any(
        &self,
        value: &WireValue,
        registry: &ConverterRegistry,
    ) -> Result<Box<dyn Any>> {
        let native = self.inner.to_native(value, registry)?;
        Ok(Box::new(native))
    }

    fn to_wire_any(&self, object: &dyn Any, registry: &ConverterRegistry) -> Result<WireValue> {
        let object = object.downcast_ref::<T>().ok_or_else(|| {
            Error::conversion(format!(
                "converter for {} received a different native type",
                type_name::<T>()
            ))
        })?;
        self.inner.to_wire(object, registry)
    }
}

/// Recover the concrete value produced by an erased converter.
pub(crate) fn downcast<T: Any>(boxed: Box<dyn Any>) -> Result<T> {
    boxed.downcast::<T>().map(|b| *b).map_err(|_| {
        Error::conversion(format!(
            "converter produced a value other than {}",
            type_name::<T>()
        ))
    })
}
