//! Core types for the tuple proxy driver
//!
//! This crate defines the client-side data model exchanged with the database:
//! - WireValue / WireKind: the self-describing MessagePack value model
//! - Object: dynamically typed native values
//! - ConverterRegistry: exact-pair conversion between wire and native values
//! - DefaultConverterFactory: the shared simple and complex registries
//! - Tuple / Field: the growable record model
//! - SpaceMetadata / MetadataProvider: field names and positions per space
//! - Error: local validation failures

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod convert;
pub mod error;
pub mod metadata;
pub mod object;
pub mod tuple;
pub mod value;

pub use convert::{
    Converter, ConverterRegistry, DefaultConverterFactory, ListConverter, MapConverter, NilPolicy,
    SerdeConverter,
};
pub use error::{Error, Result};
pub use metadata::{FieldMetadata, InMemoryMetadataProvider, MetadataProvider, SpaceMetadata};
pub use object::Object;
pub use tuple::{Field, Tuple, TupleConverter};
pub use value::{WireKind, WireValue, DECIMAL_EXT_TYPE, UUID_EXT_TYPE};
