use tupleproxy_core::WireValue;

use crate::conditions::Conditions;
use crate::error::Result;
use crate::operation::{BuilderCore, OperationBuilder, ProxyOperation};
use crate::options::{
    OperationOptions, WithBatchSize, WithBucketId, WithFields, WithMode, WithTimeout, FIRST,
};

const KIND: &str = "select";

/// Builds a select; without conditions every record matches
#[derive(Clone, Default)]
pub struct SelectBuilder {
    core: BuilderCore,
    conditions: Conditions,
}

impl SelectBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conditions and row limit.
    pub fn with_conditions(mut self, conditions: impl Into<Conditions>) -> Self {
        self.conditions = conditions.into();
        self
    }
}

impl OperationBuilder for SelectBuilder {
    fn core(&self) -> &BuilderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BuilderCore {
        &mut self.core
    }

    fn build(mut self) -> Result<ProxyOperation> {
        self.core.validate(KIND)?;
        let registry = self.core.registry();
        let payload = self.conditions.to_wire(&registry)?;
        if let Some(first) = self.conditions.first() {
            self.options_mut().set(FIRST, WireValue::from(first));
        }
        self.core.into_operation(KIND, registry, payload)
    }
}

impl WithBucketId for SelectBuilder {}
impl WithTimeout for SelectBuilder {}
impl WithFields for SelectBuilder {}
impl WithBatchSize for SelectBuilder {}
impl WithMode for SelectBuilder {}
