use tupleproxy_core::Tuple;

use super::many_tuples_payload;
use crate::error::Result;
use crate::operation::{BuilderCore, OperationBuilder, ProxyOperation};
use crate::options::{WithFields, WithRollbackOnError, WithStopOnError, WithTimeout};

const KIND: &str = "insert_many";

/// Builds a batched insert; the tuples travel as one argument in order
#[derive(Clone, Default)]
pub struct InsertManyBuilder {
    core: BuilderCore,
    tuples: Vec<Tuple>,
}

impl InsertManyBuilder {
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

impl OperationBuilder for InsertManyBuilder {
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

impl WithTimeout for InsertManyBuilder {}
impl WithFields for InsertManyBuilder {}
impl WithStopOnError for InsertManyBuilder {}
impl WithRollbackOnError for InsertManyBuilder {}
