//! Entry points that hand out pre-wired builders
//!
//! ```ignore
//! let proxy = ProxyClient::new(client);
//! let books = proxy.space("books");
//!
//! let mut tuple = books.new_tuple();
//! tuple.put_object(0, 1i64)?;
//! books.insert(tuple).with_timeout(Duration::from_secs(1)).build()?.execute()?;
//!
//! let rows = books
//!     .select(Conditions::any().and(Condition::eq("author", "Herbert")))
//!     .with_mode(ReadMode::Read)
//!     .build()?
//!     .execute()?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tupleproxy_core::{
    ConverterRegistry, DefaultConverterFactory, MetadataProvider, Object, SpaceMetadata, Tuple,
};

use crate::client::CallClient;
use crate::conditions::Conditions;
use crate::config::{CrudFunctions, ProxyConfig};
use crate::operation::OperationBuilder;
use crate::operations::{
    DeleteBuilder, InsertBuilder, InsertManyBuilder, ReplaceBuilder, ReplaceManyBuilder,
    SelectBuilder,
};
use crate::options::WithTimeout;

/// A call client bundled with a registry, configuration and metadata
///
/// # Thread Safety
///
/// `ProxyClient` is `Send + Sync`; every handle it returns shares the same
/// client and registry.
#[derive(Clone)]
pub struct ProxyClient {
    client: Arc<dyn CallClient>,
    registry: Arc<ConverterRegistry>,
    config: ProxyConfig,
    metadata: Option<Arc<dyn MetadataProvider>>,
}

impl ProxyClient {
    /// Wrap a call client with the complex default registry and the default
    /// configuration.
    pub fn new(client: Arc<dyn CallClient>) -> Self {
        Self {
            client,
            registry: Arc::new(DefaultConverterFactory::complex()),
            config: ProxyConfig::default(),
            metadata: None,
        }
    }

    /// Use a custom registry.
    pub fn with_registry(mut self, registry: Arc<ConverterRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Use a custom configuration.
    pub fn with_config(mut self, config: ProxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve space formats through a metadata provider.
    pub fn with_metadata_provider(mut self, provider: Arc<dyn MetadataProvider>) -> Self {
        self.metadata = Some(provider);
        self
    }

    /// Shared registry.
    pub fn registry(&self) -> &Arc<ConverterRegistry> {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Handle for one space.
    pub fn space(&self, space_name: impl Into<String>) -> ProxySpace {
        let space_name = space_name.into();
        let metadata = self
            .metadata
            .as_ref()
            .and_then(|provider| provider.space_by_name(&space_name));
        ProxySpace {
            client: Arc::clone(&self.client),
            registry: Arc::clone(&self.registry),
            functions: self.config.functions.clone(),
            timeout: self.config.timeout_ms.map(Duration::from_millis),
            space_name,
            metadata,
        }
    }
}

/// Operations against one space
#[derive(Clone)]
pub struct ProxySpace {
    client: Arc<dyn CallClient>,
    registry: Arc<ConverterRegistry>,
    functions: CrudFunctions,
    timeout: Option<Duration>,
    space_name: String,
    metadata: Option<Arc<SpaceMetadata>>,
}

impl ProxySpace {
    /// Space name.
    pub fn name(&self) -> &str {
        &self.space_name
    }

    /// Space format, when the metadata provider knows the space.
    pub fn metadata(&self) -> Option<&Arc<SpaceMetadata>> {
        self.metadata.as_ref()
    }

    /// Empty tuple bound to this space's registry and format.
    pub fn new_tuple(&self) -> Tuple {
        match &self.metadata {
            Some(metadata) => Tuple::with_metadata(Arc::clone(&self.registry), Arc::clone(metadata)),
            None => Tuple::new(Arc::clone(&self.registry)),
        }
    }

    /// Insert one tuple.
    pub fn insert(&self, tuple: Tuple) -> InsertBuilder {
        self.prepare(InsertBuilder::new(), &self.functions.insert)
            .with_tuple(tuple)
    }

    /// Insert a batch of tuples.
    pub fn insert_many<I: IntoIterator<Item = Tuple>>(&self, tuples: I) -> InsertManyBuilder {
        self.prepare(InsertManyBuilder::new(), &self.functions.insert_many)
            .with_tuples(tuples)
    }

    /// Replace one tuple.
    pub fn replace(&self, tuple: Tuple) -> ReplaceBuilder {
        self.prepare(ReplaceBuilder::new(), &self.functions.replace)
            .with_tuple(tuple)
    }

    /// Replace a batch of tuples.
    pub fn replace_many<I: IntoIterator<Item = Tuple>>(&self, tuples: I) -> ReplaceManyBuilder {
        self.prepare(ReplaceManyBuilder::new(), &self.functions.replace_many)
            .with_tuples(tuples)
    }

    /// Delete by primary key.
    pub fn delete<I, V>(&self, key: I) -> DeleteBuilder
    where
        I: IntoIterator<Item = V>,
        V: Into<Object>,
    {
        self.prepare(DeleteBuilder::new(), &self.functions.delete)
            .with_key(key)
    }

    /// Select by conditions.
    pub fn select(&self, conditions: impl Into<Conditions>) -> SelectBuilder {
        self.prepare(SelectBuilder::new(), &self.functions.select)
            .with_conditions(conditions)
    }

    fn prepare<B>(&self, builder: B, function_name: &str) -> B
    where
        B: OperationBuilder + WithTimeout,
    {
        let builder = builder
            .with_client(Arc::clone(&self.client))
            .with_function_name(function_name)
            .with_space_name(self.space_name.as_str())
            .with_registry(Arc::clone(&self.registry));
        let builder = match &self.metadata {
            Some(metadata) => builder.with_metadata(Arc::clone(metadata)),
            None => builder,
        };
        match self.timeout {
            Some(timeout) => builder.with_timeout(timeout),
            None => builder,
        }
    }
}
