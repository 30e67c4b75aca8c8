//! Converters for application types that implement `serde`

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Converter, ConverterRegistry};
use crate::error::{Error, Result};
use crate::value::WireValue;

/// Bridges any `Serialize + DeserializeOwned` type through `rmpv`'s serde
/// support.
///
/// Register the converter under the wire kind `T` serializes to; tuple
/// structs serialize as arrays, matching how the database stores records.
pub struct SerdeConverter<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> SerdeConverter<T> {
    /// Create a converter for `T`.
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeConverter<{}>", std::any::type_name::<T>())
    }
}

impl<T> Converter<T> for SerdeConverter<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn to_native(&self, value: &WireValue, _: &ConverterRegistry) -> Result<T> {
        rmpv::ext::from_value(value.clone()).map_err(|e| Error::conversion(e.to_string()))
    }

    fn to_wire(&self, object: &T, _: &ConverterRegistry) -> Result<WireValue> {
        rmpv::ext::to_value(object).map_err(|e| Error::conversion(e.to_string()))
    }
}
