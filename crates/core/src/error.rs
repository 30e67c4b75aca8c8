//! Error types for the conversion registry and tuple model
//!
//! Every error here is a local validation failure raised synchronously at the
//! point of violation. Nothing is coerced into a default value.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

use crate::value::WireKind;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the conversion registry and the tuple model
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Position | `IndexOutOfBounds` | Negative or out-of-format tuple position |
/// | Naming | `FieldNotFound` | Name lookup without metadata or unknown name |
/// | Conversion | `NoConverterFound`, `Conversion` | No exact converter, or a converter rejected the value |
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Tuple position is negative or beyond the space format
    #[error("index out of bounds: position {position}")]
    IndexOutOfBounds {
        /// Requested position
        position: isize,
        /// Exclusive upper bound in effect, if any
        limit: Option<usize>,
    },

    /// Field name cannot be resolved to a position
    #[error("field not found: {field}{}", .space.as_deref().map(|s| format!(" in space {s}")).unwrap_or_default())]
    FieldNotFound {
        /// Requested field name
        field: String,
        /// Space the lookup ran against, when metadata was present
        space: Option<String>,
    },

    /// No exact converter is registered for the requested pair
    #[error("no converter found from {from} to {to}")]
    NoConverterFound {
        /// Source kind or type name
        from: String,
        /// Target kind or type name
        to: String,
    },

    /// A converter exists but rejected the value
    #[error("conversion error: {reason}")]
    Conversion {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Position error for a negative or out-of-format position.
    pub fn index_out_of_bounds(position: isize, limit: Option<usize>) -> Self {
        Error::IndexOutOfBounds { position, limit }
    }

    /// Name lookup failure.
    pub fn field_not_found(field: impl Into<String>, space: Option<&str>) -> Self {
        Error::FieldNotFound {
            field: field.into(),
            space: space.map(str::to_string),
        }
    }

    /// Missing decoder for a wire kind and a native target type.
    pub fn no_decoder(kind: WireKind, target: &str) -> Self {
        Error::NoConverterFound {
            from: kind.to_string(),
            to: target.to_string(),
        }
    }

    /// Missing encoder for a native source type.
    pub fn no_encoder(source: &str) -> Self {
        Error::NoConverterFound {
            from: source.to_string(),
            to: "wire value".to_string(),
        }
    }

    /// Converter rejected the value.
    pub fn conversion(reason: impl Into<String>) -> Self {
        Error::Conversion {
            reason: reason.into(),
        }
    }

    /// True for both `NoConverterFound` and `Conversion`.
    pub fn is_conversion(&self) -> bool {
        matches!(self, Error::NoConverterFound { .. } | Error::Conversion { .. })
    }
}
