//! Space metadata: the schema of a record collection
//!
//! A space's format lists its fields in position order. Tuples carrying
//! metadata can address fields by name; the format's length also bounds the
//! positions a tuple may write.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::WireValue;

/// One field of a space format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Field name
    pub name: String,
    /// Database type name ("string", "unsigned", "any", ...)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether nil is allowed
    #[serde(default)]
    pub is_nullable: bool,
    /// Zero-based position within the record
    #[serde(default)]
    pub position: usize,
}

impl FieldMetadata {
    /// Non-nullable field; the position is assigned by [`SpaceMetadata::new`].
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            is_nullable: false,
            position: 0,
        }
    }

    /// Mark the field nullable.
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }
}

/// Name and format of a space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceMetadata {
    /// Space name
    pub space_name: String,
    /// Fields in position order
    pub fields: Vec<FieldMetadata>,
}

impl SpaceMetadata {
    /// Create metadata, numbering fields by their order.
    pub fn new(space_name: impl Into<String>, fields: Vec<FieldMetadata>) -> Self {
        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(position, field)| FieldMetadata { position, ..field })
            .collect();
        Self {
            space_name: space_name.into(),
            fields,
        }
    }

    /// Parse a format returned by the proxy: an array of maps with `name`,
    /// `type` and optional `is_nullable` keys.
    pub fn from_format(space_name: impl Into<String>, format: &WireValue) -> Result<Self> {
        let fields: Vec<FieldMetadata> = rmpv::ext::from_value(format.clone())
            .map_err(|e| Error::conversion(format!("invalid space format: {e}")))?;
        Ok(Self::new(space_name, fields))
    }

    /// Number of fields in the format.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Position of a named field.
    pub fn field_position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field at a position.
    pub fn field(&self, position: usize) -> Option<&FieldMetadata> {
        self.fields.get(position)
    }
}

/// Source of space metadata, injected by the host
pub trait MetadataProvider: Send + Sync {
    /// Look up a space by name.
    fn space_by_name(&self, space_name: &str) -> Option<Arc<SpaceMetadata>>;

    /// Resolve a field name to its position within a space.
    fn resolve_field_name(&self, space_name: &str, field_name: &str) -> Result<usize> {
        self.space_by_name(space_name)
            .and_then(|space| space.field_position(field_name))
            .ok_or_else(|| Error::field_not_found(field_name, Some(space_name)))
    }
}

/// Metadata provider backed by a map of known spaces
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataProvider {
    spaces: HashMap<String, Arc<SpaceMetadata>>,
}

impl InMemoryMetadataProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a space.
    pub fn add_space(&mut self, space: SpaceMetadata) {
        self.spaces
            .insert(space.space_name.clone(), Arc::new(space));
    }

    /// Builder-style [`add_space`](Self::add_space).
    pub fn with_space(mut self, space: SpaceMetadata) -> Self {
        self.add_space(space);
        self
    }
}

impl MetadataProvider for InMemoryMetadataProvider {
    fn space_by_name(&self, space_name: &str) -> Option<Arc<SpaceMetadata>> {
        self.spaces.get(space_name).cloned()
    }
}
