//! # Tuple Proxy Executor
//!
//! Builds CRUD operations against a sharded cluster's proxy functions and
//! executes them through an injected call client.
//!
//! It provides:
//! - [`ProxyClient`] / [`ProxySpace`] - Entry points handing out wired builders
//! - One builder per operation kind, see [`operations`]
//! - Option mixins such as [`WithTimeout`] and [`WithBucketId`]
//! - [`ProxyOperation`] - The immutable, single-use built call
//! - [`CallClient`] - The seam to the transport
//!
//! ## Quick Start
//!
//! ```text
//! use tupleproxy_executor::prelude::*;
//!
//! let proxy = ProxyClient::new(client);
//! let books = proxy.space("books");
//!
//! let mut tuple = books.new_tuple();
//! tuple.put_object(0, 1i64)?;
//! tuple.put_object(1, "Dune".to_string())?;
//! books.insert(tuple).build()?.execute()?;
//!
//! let rows = books
//!     .select(Condition::eq("id", 1i64))
//!     .with_bucket_id(42)
//!     .with_mode(ReadMode::Write)
//!     .build()?
//!     .execute()?;
//! ```
//!
//! ## Operations
//!
//! | Operation | Default function | Payload |
//! |-----------|------------------|---------|
//! | insert | `crud.insert` | tuple |
//! | insert_many | `crud.insert_many` | array of tuples |
//! | replace | `crud.replace` | tuple |
//! | replace_many | `crud.replace_many` | array of tuples |
//! | delete | `crud.delete` | key |
//! | select | `crud.select` | conditions |
//!
//! Every call sends `[space_name, payload, options]`.

#![warn(missing_docs)]

mod client;
mod conditions;
mod config;
mod error;
mod mapper;
mod operation;
pub mod operations;
pub mod options;
mod space;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use client::CallClient;
pub use conditions::{Condition, Conditions, Operator};
pub use config::{CrudFunctions, ProxyConfig, CONFIG_FILE_NAME};
pub use error::{ClientError, Error, Result};
pub use mapper::{SingleValueCallResult, TupleResultMapper};
pub use operation::{BuilderCore, OperationBuilder, ProxyOperation};
pub use operations::{
    DeleteBuilder, InsertBuilder, InsertManyBuilder, ReplaceBuilder, ReplaceManyBuilder,
    SelectBuilder,
};
pub use options::{
    OperationOptions, OptionSet, ReadMode, WithBatchSize, WithBucketId, WithFields, WithMode,
    WithRollbackOnError, WithStopOnError, WithTimeout,
};
pub use space::{ProxyClient, ProxySpace};

/// Everything needed to build and run operations.
pub mod prelude {
    pub use crate::options::{
        OperationOptions, WithBatchSize, WithBucketId, WithFields, WithMode,
        WithRollbackOnError, WithStopOnError, WithTimeout,
    };
    pub use crate::{
        CallClient, Condition, Conditions, Error, OperationBuilder, ProxyClient, ProxySpace,
        ReadMode,
    };
    pub use tupleproxy_core::{DefaultConverterFactory, Object, Tuple, WireValue};
}
