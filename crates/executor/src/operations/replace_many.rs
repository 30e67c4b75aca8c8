use tupleproxy_core::Tuple;

use super::many_tuples_payload;
use crate::error::Result;
use crate::operation::{BuilderCore, OperationBuilder, ProxyOperation};
use crate::options::{WithFields, WithRollbackOnError, WithStopOnError, WithTimeout};

const KIND: &str = "replace_many";

/// Builds a batched replace; the tuples travel as one argument in order
#[derive(Clone, Default)]
pub struct ReplaceManyBuilder {
    core: BuilderCore,
    tuples: Vec<Tuple>,
}

impl ReplaceManyBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the batch.
    pub fn with_tuples<I: IntoIterator<Item = Tuple>>(mut self, tuples: I) -> Self {
        self.tuples = tuples.into_iter().collect();
        self
    }

    /// Append one tuple to the batch.
    pub fn add_tuple(mut self, tuple: Tuple) -> Self {
        self.tuples.push(tuple);
        self
    }
}

impl OperationBuilder for ReplaceManyBuilder {
    fn core(&self) -> &BuilderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BuilderCore {
        &mut self.core
    }

    fn build(self) -> Result<ProxyOperation> {
        self.core.validate(KIND)?;
        let payload = many_tuples_payload(KIND, &self.tuples)?;
        let registry = self.core.registry();
        self.core.into_operation(KIND, registry, payload)
    }
}

impl WithTimeout for ReplaceManyBuilder {}
impl WithFields for ReplaceManyBuilder {}
impl WithStopOnError for ReplaceManyBuilder {}
impl WithRollbackOnError for ReplaceManyBuilder {}
