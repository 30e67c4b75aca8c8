//! Built operations and the builder plumbing shared by every kind
//!
//! A builder collects the call target, the payload and the options, and
//! [`build`](OperationBuilder::build) turns them into an immutable
//! [`ProxyOperation`]. Building validates and encodes; it never calls out.
//! Executing consumes the operation, so each one is submitted exactly once.

use std::fmt;
use std::sync::Arc;

use tupleproxy_core::{ConverterRegistry, DefaultConverterFactory, SpaceMetadata, Tuple, WireValue};

use crate::client::CallClient;
use crate::error::{Error, Result};
use crate::mapper::TupleResultMapper;
use crate::options::{OperationOptions, OptionSet};

/// A single remote call, ready to execute
pub struct ProxyOperation {
    client: Arc<dyn CallClient>,
    function_name: String,
    arguments: Vec<WireValue>,
    registry: Arc<ConverterRegistry>,
    result_mapper: TupleResultMapper,
}

impl ProxyOperation {
    /// Remote function to call.
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Positional arguments: space name, payload, options.
    pub fn arguments(&self) -> &[WireValue] {
        &self.arguments
    }

    /// The options map sent as the last argument.
    pub fn options(&self) -> Option<&WireValue> {
        self.arguments.last()
    }

    /// Registry that encoded the arguments and decodes the result.
    pub fn registry(&self) -> &Arc<ConverterRegistry> {
        &self.registry
    }

    /// Submit the call and decode the returned records.
    pub fn execute(self) -> Result<Vec<Tuple>> {
        tracing::debug!(
            target: "tupleproxy::proxy",
            function = %self.function_name,
            arguments = self.arguments.len(),
            "Submitting proxy call"
        );
        let response = self
            .client
            .call(&self.function_name, self.arguments)
            .map_err(Error::Client)?;

        let result = self.result_mapper.map(response);
        match &result {
            Ok(tuples) => tracing::debug!(
                target: "tupleproxy::proxy",
                function = %self.function_name,
                rows = tuples.len(),
                "Proxy call completed"
            ),
            Err(Error::Remote { payload }) => tracing::warn!(
                target: "tupleproxy::proxy",
                function = %self.function_name,
                error = %payload,
                "Proxy call returned an error"
            ),
            Err(_) => {}
        }
        result
    }
}

impl fmt::Debug for ProxyOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyOperation")
            .field("function_name", &self.function_name)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// State shared by every operation builder
#[derive(Clone, Default)]
pub struct BuilderCore {
    client: Option<Arc<dyn CallClient>>,
    function_name: Option<String>,
    space_name: Option<String>,
    registry: Option<Arc<ConverterRegistry>>,
    metadata: Option<Arc<SpaceMetadata>>,
    options: OptionSet,
}

impl BuilderCore {
    /// Registry used for encoding; the complex default when none was set.
    pub fn registry(&self) -> Arc<ConverterRegistry> {
        self.registry
            .clone()
            .unwrap_or_else(|| Arc::new(DefaultConverterFactory::complex()))
    }

    /// Space format attached to decoded tuples.
    pub fn metadata(&self) -> Option<&Arc<SpaceMetadata>> {
        self.metadata.as_ref()
    }

    /// Options collected so far.
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub(crate) fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    /// Check the inputs every operation needs.
    pub(crate) fn validate(&self, kind: &str) -> Result<()> {
        if self.function_name.as_deref().map_or(true, str::is_empty) {
            return Err(Error::validation(format!("{kind}: function name must be set")));
        }
        if self.client.is_none() {
            return Err(Error::validation(format!("{kind}: call client must be set")));
        }
        if self.space_name.as_deref().map_or(true, str::is_empty) {
            return Err(Error::validation(format!("{kind}: space name must be set")));
        }
        Ok(())
    }

    /// Package a validated builder into an operation.
    pub(crate) fn into_operation(
        self,
        kind: &str,
        registry: Arc<ConverterRegistry>,
        payload: WireValue,
    ) -> Result<ProxyOperation> {
        let (Some(client), Some(function_name), Some(space_name)) =
            (self.client, self.function_name, self.space_name)
        else {
            return Err(Error::validation(format!("{kind}: builder is incomplete")));
        };

        let arguments = vec![
            WireValue::from(space_name.as_str()),
            payload,
            self.options.to_wire_value(),
        ];
        let result_mapper =
            TupleResultMapper::new(Arc::clone(&registry), space_name).with_metadata(self.metadata);
        Ok(ProxyOperation {
            client,
            function_name,
            arguments,
            registry,
            result_mapper,
        })
    }
}

/// Setters shared by every operation builder.
///
/// Every setter returns the concrete builder, so they chain freely with the
/// option mixins and the kind-specific setters.
pub trait OperationBuilder: Sized {
    /// Shared builder state.
    fn core(&self) -> &BuilderCore;

    /// Mutable shared builder state.
    fn core_mut(&mut self) -> &mut BuilderCore;

    /// Validate and produce the operation.
    fn build(self) -> Result<ProxyOperation>;

    /// Set the call-dispatch client.
    fn with_client(mut self, client: Arc<dyn CallClient>) -> Self {
        self.core_mut().client = Some(client);
        self
    }

    /// Set the remote function name.
    fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.core_mut().function_name = Some(function_name.into());
        self
    }

    /// Set the target space.
    fn with_space_name(mut self, space_name: impl Into<String>) -> Self {
        self.core_mut().space_name = Some(space_name.into());
        self
    }

    /// Set the registry that encodes arguments and decodes results.
    fn with_registry(mut self, registry: Arc<ConverterRegistry>) -> Self {
        self.core_mut().registry = Some(registry);
        self
    }

    /// Attach a space format to decoded tuples.
    fn with_metadata(mut self, metadata: Arc<SpaceMetadata>) -> Self {
        self.core_mut().metadata = Some(metadata);
        self
    }
}

impl<B: OperationBuilder> OperationOptions for B {
    fn options(&self) -> &OptionSet {
        self.core().options()
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        self.core_mut().options_mut()
    }
}
