use tupleproxy_core::Tuple;

use super::single_tuple_payload;
use crate::error::Result;
use crate::operation::{BuilderCore, OperationBuilder, ProxyOperation};
use crate::options::{WithFields, WithTimeout};

const KIND: &str = "replace";

/// Builds a replace of one tuple
#[derive(Clone, Default)]
pub struct ReplaceBuilder {
    core: BuilderCore,
    tuple: Option<Tuple>,
}

impl ReplaceBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tuple to replace.
    pub fn with_tuple(mut self, tuple: Tuple) -> Self {
        self.tuple = Some(tuple);
        self
    }
}

impl OperationBuilder for ReplaceBuilder {
    fn core(&self) -> &BuilderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BuilderCore {
        &mut self.core
    }

    fn build(self) -> Result<ProxyOperation> {
        self.core.validate(KIND)?;
        let payload = single_tuple_payload(KIND, self.tuple.as_ref())?;
        let registry = self.core.registry();
        self.core.into_operation(KIND, registry, payload)
    }
}

impl WithTimeout for ReplaceBuilder {}
impl WithFields for ReplaceBuilder {}
