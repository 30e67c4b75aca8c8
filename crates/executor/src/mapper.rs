//! Result envelopes and their decoding into tuples
//!
//! A remote function returns an array of values. Proxy functions return
//! `[result]` on success and `[nil, error]` on failure. The result itself is
//! one of:
//! - nil: no records
//! - an array of records
//! - a map `{rows = [...], metadata = [...]}` carrying the space format

use std::sync::Arc;

use tupleproxy_core::{ConverterRegistry, SpaceMetadata, Tuple, WireKind, WireValue};

use crate::error::{Error, Result};

const ROWS: &str = "rows";
const METADATA: &str = "metadata";

/// The `[value, error?]` envelope of a single-result call
#[derive(Debug, Clone, PartialEq)]
pub struct SingleValueCallResult {
    value: WireValue,
    error: Option<WireValue>,
}

impl SingleValueCallResult {
    /// Split a call response into its value and error parts.
    ///
    /// An empty response is a nil value. A nil error means success.
    pub fn from_wire(response: WireValue) -> Result<Self> {
        match response {
            WireValue::Array(items) => {
                let mut items = items.into_iter();
                let value = items.next().unwrap_or(WireValue::Nil);
                let error = items.next().filter(|e| !e.is_nil());
                Ok(Self { value, error })
            }
            other => Err(Error::unexpected(format!(
                "call result must be an Array, got {}",
                WireKind::of(&other)
            ))),
        }
    }

    /// Result value.
    pub fn value(&self) -> &WireValue {
        &self.value
    }

    /// Error payload, when the call failed.
    pub fn error(&self) -> Option<&WireValue> {
        self.error.as_ref()
    }

    /// The value, or [`Error::Remote`] carrying the untouched error payload.
    pub fn into_result(self) -> Result<WireValue> {
        match self.error {
            Some(payload) => Err(Error::Remote { payload }),
            None => Ok(self.value),
        }
    }
}

/// Decodes a call response into tuples
#[derive(Debug, Clone)]
pub struct TupleResultMapper {
    registry: Arc<ConverterRegistry>,
    space_name: String,
    metadata: Option<Arc<SpaceMetadata>>,
}

impl TupleResultMapper {
    /// Create a mapper for records of one space.
    pub fn new(registry: Arc<ConverterRegistry>, space_name: impl Into<String>) -> Self {
        Self {
            registry,
            space_name: space_name.into(),
            metadata: None,
        }
    }

    /// Metadata attached to decoded tuples when the response carries none.
    pub fn with_metadata(mut self, metadata: Option<Arc<SpaceMetadata>>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Decode a full call response.
    pub fn map(&self, response: WireValue) -> Result<Vec<Tuple>> {
        let value = SingleValueCallResult::from_wire(response)?.into_result()?;
        self.map_value(&value)
    }

    /// Decode the result value of a call, server order preserved.
    pub fn map_value(&self, value: &WireValue) -> Result<Vec<Tuple>> {
        match value {
            WireValue::Nil => Ok(Vec::new()),
            WireValue::Array(rows) => self.map_rows(rows, self.metadata.clone()),
            WireValue::Map(entries) => {
                let lookup = |key: &str| {
                    entries
                        .iter()
                        .find(|(k, _)| k.as_str() == Some(key))
                        .map(|(_, v)| v)
                };
                let metadata = match lookup(METADATA) {
                    Some(format) if !format.is_nil() => Some(Arc::new(
                        SpaceMetadata::from_format(self.space_name.as_str(), format)?,
                    )),
                    _ => self.metadata.clone(),
                };
                match lookup(ROWS) {
                    Some(WireValue::Array(rows)) => self.map_rows(rows, metadata),
                    Some(WireValue::Nil) | None => Ok(Vec::new()),
                    Some(other) => Err(Error::unexpected(format!(
                        "rows must be an Array, got {}",
                        WireKind::of(other)
                    ))),
                }
            }
            other => Err(Error::unexpected(format!(
                "result must be nil, an Array or a Map, got {}",
                WireKind::of(other)
            ))),
        }
    }

    fn map_rows(
        &self,
        rows: &[WireValue],
        metadata: Option<Arc<SpaceMetadata>>,
    ) -> Result<Vec<Tuple>> {
        rows.iter()
            .map(|row| {
                let tuple = Tuple::from_wire(row, Arc::clone(&self.registry))?;
                Ok(match &metadata {
                    Some(metadata) => tuple.attach_metadata(Arc::clone(metadata)),
                    None => tuple,
                })
            })
            .collect()
    }
}
