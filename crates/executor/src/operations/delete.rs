use tupleproxy_core::{Object, WireValue};

use crate::error::{Error, Result};
use crate::operation::{BuilderCore, OperationBuilder, ProxyOperation};
use crate::options::{WithBucketId, WithFields, WithTimeout};

const KIND: &str = "delete";

/// Builds a delete by primary key
///
/// The key holds one value per primary index part.
#[derive(Clone, Default)]
pub struct DeleteBuilder {
    core: BuilderCore,
    key: Option<Vec<Object>>,
}

impl DeleteBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary key of the record to delete.
    pub fn with_key<I, V>(mut self, key: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Object>,
    {
        self.key = Some(key.into_iter().map(Into::into).collect());
        self
    }
}

impl OperationBuilder for DeleteBuilder {
    fn core(&self) -> &BuilderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BuilderCore {
        &mut self.core
    }

    fn build(self) -> Result<ProxyOperation> {
        self.core.validate(KIND)?;
        let key = match self.key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(Error::validation(format!("{KIND}: key must be set"))),
        };
        let registry = self.core.registry();
        let payload = key
            .iter()
            .map(|part| registry.to_wire(part))
            .collect::<tupleproxy_core::Result<Vec<_>>>()
            .map(WireValue::Array)?;
        self.core.into_operation(KIND, registry, payload)
    }
}

impl WithBucketId for DeleteBuilder {}
impl WithTimeout for DeleteBuilder {}
impl WithFields for DeleteBuilder {}
