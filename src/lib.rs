//! Tuple proxy - typed records and CRUD proxy operations for sharded
//! MessagePack databases
//!
//! # Quick Start
//!
//! ```ignore
//! use tupleproxy::prelude::*;
//!
//! let proxy = ProxyClient::new(client);
//! let books = proxy.space("books");
//!
//! let mut tuple = books.new_tuple();
//! tuple.put_object(0, 1i64)?;
//! tuple.put_object(1, "Dune".to_string())?;
//! books.insert(tuple).build()?.execute()?;
//! ```
//!
//! # Architecture
//!
//! The conversion registry and the tuple model live in `tupleproxy-core`;
//! operation builders and execution live in `tupleproxy-executor`. Both are
//! re-exported here. The transport is not part of this crate: it is injected
//! as a [`CallClient`].

// Re-export the public API from tupleproxy-executor
pub use tupleproxy_executor::*;

// Re-export the data model from tupleproxy-core
pub use tupleproxy_core::{
    convert, Converter, ConverterRegistry, DefaultConverterFactory, Field, FieldMetadata,
    InMemoryMetadataProvider, MetadataProvider, NilPolicy, Object, SerdeConverter, SpaceMetadata,
    Tuple, TupleConverter, WireKind, WireValue,
};

/// Errors raised by the conversion registry and the tuple model.
pub use tupleproxy_core::Error as CoreError;
