//! The record model
//!
//! A [`Tuple`] is an ordered, zero-indexed sequence of [`Field`]s that grows
//! on demand. It is addressed by position, or by name when it carries
//! [`SpaceMetadata`].
//!
//! ## Position Rules
//!
//! | Operation | Negative position | Position >= size | Position >= format length |
//! |-----------|-------------------|------------------|---------------------------|
//! | read | `IndexOutOfBounds` | `None` | `None` |
//! | write | `IndexOutOfBounds` | grows, gap filled with nil | `IndexOutOfBounds` |
//!
//! The format length only applies when metadata is attached and its format
//! is non-empty.

mod field;

pub use field::Field;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::convert::{Converter, ConverterRegistry};
use crate::error::{Error, Result};
use crate::metadata::SpaceMetadata;
use crate::object::Object;
use crate::value::{WireKind, WireValue};

/// Growable record of fields, bound to a registry and optional metadata
///
/// Cloning copies the field sequence; the registry and metadata handles are
/// shared read-only.
#[derive(Clone)]
pub struct Tuple {
    fields: Vec<Field>,
    registry: Arc<ConverterRegistry>,
    metadata: Option<Arc<SpaceMetadata>>,
}

impl Tuple {
    /// Create an empty tuple without metadata.
    pub fn new(registry: impl Into<Arc<ConverterRegistry>>) -> Self {
        Self {
            fields: Vec::new(),
            registry: registry.into(),
            metadata: None,
        }
    }

    /// Create an empty tuple bound to a space format.
    pub fn with_metadata(
        registry: impl Into<Arc<ConverterRegistry>>,
        metadata: Arc<SpaceMetadata>,
    ) -> Self {
        Self {
            fields: Vec::new(),
            registry: registry.into(),
            metadata: Some(metadata),
        }
    }

    /// Parse an array-kind wire value into a tuple.
    pub fn from_wire(value: &WireValue, registry: impl Into<Arc<ConverterRegistry>>) -> Result<Self> {
        match value {
            WireValue::Array(items) => Ok(Self {
                fields: items.iter().cloned().map(Field::new).collect(),
                registry: registry.into(),
                metadata: None,
            }),
            other => Err(Error::conversion(format!(
                "tuple must be an Array wire value, got {}",
                WireKind::of(other)
            ))),
        }
    }

    /// Build a tuple from dynamic native values, one field each.
    pub fn from_objects<I>(objects: I, registry: impl Into<Arc<ConverterRegistry>>) -> Result<Self>
    where
        I: IntoIterator<Item = Object>,
    {
        let registry = registry.into();
        let fields = objects
            .into_iter()
            .map(|object| Field::from_native(&object, &registry))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            fields,
            registry,
            metadata: None,
        })
    }

    /// Attach a space format, enabling name-based access.
    pub fn attach_metadata(mut self, metadata: Arc<SpaceMetadata>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Registry used for every conversion.
    pub fn registry(&self) -> &Arc<ConverterRegistry> {
        &self.registry
    }

    /// Space format, if attached.
    pub fn metadata(&self) -> Option<&Arc<SpaceMetadata>> {
        self.metadata.as_ref()
    }

    /// Current length including nil-filled gaps.
    pub fn size(&self) -> usize {
        self.fields.len()
    }

    /// Check if the tuple has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in position order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Iterate over fields in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Canonical array-kind wire representation of the record.
    pub fn to_wire_value(&self) -> WireValue {
        WireValue::Array(self.fields.iter().map(|f| f.value().clone()).collect())
    }

    // ========================================================================
    // Positional access
    // ========================================================================

    /// Field at a position; `None` past the end.
    pub fn get_field(&self, position: isize) -> Result<Option<&Field>> {
        let index = Self::read_index(position)?;
        Ok(self.fields.get(index))
    }

    /// Replace the field at a position, growing the tuple if needed.
    pub fn set_field(&mut self, position: isize, field: Field) -> Result<()> {
        let index = self.write_index(position)?;
        self.store(index, field);
        Ok(())
    }

    /// Encode a native value and store it at a position.
    pub fn put_object<T: Any>(&mut self, position: isize, value: T) -> Result<()> {
        let index = self.write_index(position)?;
        let field = Field::from_native(&value, &self.registry)?;
        self.store(index, field);
        Ok(())
    }

    /// Append a field after the last position.
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        self.check_format_bound(self.fields.len())?;
        self.fields.push(field);
        Ok(())
    }

    /// Encode a native value and append it.
    pub fn add_object<T: Any>(&mut self, value: T) -> Result<()> {
        let field = Field::from_native(&value, &self.registry)?;
        self.add_field(field)
    }

    /// Decode the field at a position into `T`.
    pub fn get<T: Any>(&self, position: isize) -> Result<Option<T>> {
        match self.get_field(position)? {
            Some(field) => field.get(&self.registry),
            None => Ok(None),
        }
    }

    /// Decode the field at a position into its default native type.
    pub fn get_object(&self, position: isize) -> Result<Option<Object>> {
        match self.get_field(position)? {
            Some(field) => field.as_object(&self.registry),
            None => Ok(None),
        }
    }

    /// 32-bit integer at a position.
    pub fn get_integer(&self, position: isize) -> Result<Option<i32>> {
        self.get(position)
    }

    /// 64-bit integer at a position.
    pub fn get_long(&self, position: isize) -> Result<Option<i64>> {
        self.get(position)
    }

    /// 32-bit float at a position.
    pub fn get_float(&self, position: isize) -> Result<Option<f32>> {
        self.get(position)
    }

    /// 64-bit float at a position.
    pub fn get_double(&self, position: isize) -> Result<Option<f64>> {
        self.get(position)
    }

    /// Boolean at a position.
    pub fn get_boolean(&self, position: isize) -> Result<Option<bool>> {
        self.get(position)
    }

    /// String at a position.
    pub fn get_string(&self, position: isize) -> Result<Option<String>> {
        self.get(position)
    }

    /// Raw bytes at a position.
    pub fn get_bytes(&self, position: isize) -> Result<Option<Vec<u8>>> {
        self.get(position)
    }

    /// UUID at a position.
    pub fn get_uuid(&self, position: isize) -> Result<Option<Uuid>> {
        self.get(position)
    }

    /// Decimal at a position.
    pub fn get_decimal(&self, position: isize) -> Result<Option<Decimal>> {
        self.get(position)
    }

    /// Homogeneous list at a position; needs container support.
    pub fn get_list<T: Any>(&self, position: isize) -> Result<Option<Vec<T>>> {
        match self.get_field(position)? {
            Some(field) if !field.is_nil() => {
                self.registry.to_native_list(field.value()).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Homogeneous map at a position; needs container support.
    pub fn get_map<K, V>(&self, position: isize) -> Result<Option<HashMap<K, V>>>
    where
        K: Any + Eq + Hash,
        V: Any,
    {
        match self.get_field(position)? {
            Some(field) if !field.is_nil() => {
                self.registry.to_native_map(field.value()).map(Some)
            }
            _ => Ok(None),
        }
    }

    // ========================================================================
    // Name-based access
    // ========================================================================

    /// Field with the given name; `None` past the end.
    pub fn get_field_by_name(&self, name: &str) -> Result<Option<&Field>> {
        let index = self.resolve(name)?;
        Ok(self.fields.get(index))
    }

    /// Replace the named field, growing the tuple if needed.
    pub fn set_field_by_name(&mut self, name: &str, field: Field) -> Result<()> {
        let index = self.resolve(name)?;
        self.store(index, field);
        Ok(())
    }

    /// Encode a native value and store it in the named field.
    pub fn put_object_by_name<T: Any>(&mut self, name: &str, value: T) -> Result<()> {
        let index = self.resolve(name)?;
        let field = Field::from_native(&value, &self.registry)?;
        self.store(index, field);
        Ok(())
    }

    /// Decode the named field into `T`.
    pub fn get_by_name<T: Any>(&self, name: &str) -> Result<Option<T>> {
        match self.get_field_by_name(name)? {
            Some(field) => field.get(&self.registry),
            None => Ok(None),
        }
    }

    /// Decode the named field into its default native type.
    pub fn get_object_by_name(&self, name: &str) -> Result<Option<Object>> {
        match self.get_field_by_name(name)? {
            Some(field) => field.as_object(&self.registry),
            None => Ok(None),
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn read_index(position: isize) -> Result<usize> {
        usize::try_from(position).map_err(|_| Error::index_out_of_bounds(position, None))
    }

    fn write_index(&self, position: isize) -> Result<usize> {
        let index = Self::read_index(position)?;
        self.check_format_bound(index)
            .map_err(|_| Error::index_out_of_bounds(position, self.format_limit()))?;
        Ok(index)
    }

    fn format_limit(&self) -> Option<usize> {
        self.metadata
            .as_ref()
            .map(|m| m.field_count())
            .filter(|count| *count > 0)
    }

    fn check_format_bound(&self, index: usize) -> Result<()> {
        match self.format_limit() {
            Some(limit) if index >= limit => Err(Error::IndexOutOfBounds {
                position: isize::try_from(index).unwrap_or(isize::MAX),
                limit: Some(limit),
            }),
            _ => Ok(()),
        }
    }

    fn resolve(&self, name: &str) -> Result<usize> {
        let metadata = self
            .metadata
            .as_ref()
            .ok_or_else(|| Error::field_not_found(name, None))?;
        metadata
            .field_position(name)
            .ok_or_else(|| Error::field_not_found(name, Some(&metadata.space_name)))
    }

    fn store(&mut self, index: usize, field: Field) {
        if index < self.fields.len() {
            self.fields[index] = field;
        } else {
            self.fields.resize_with(index, Field::nil);
            self.fields.push(field);
        }
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tuple")
            .field("fields", &self.fields)
            .field(
                "space",
                &self.metadata.as_ref().map(|m| m.space_name.as_str()),
            )
            .finish()
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Array ↔ [`Tuple`]
///
/// Registered by the complex registry so tuples nest inside other values.
/// Decoded tuples share a copy of the decoding registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TupleConverter;

impl Converter<Tuple> for TupleConverter {
    fn to_native(&self, value: &WireValue, registry: &ConverterRegistry) -> Result<Tuple> {
        Tuple::from_wire(value, registry.clone())
    }

    fn to_wire(&self, object: &Tuple, _: &ConverterRegistry) -> Result<WireValue> {
        Ok(object.to_wire_value())
    }
}
