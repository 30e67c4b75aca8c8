//! Error types for proxy operations.
//!
//! Local failures (conversion, tuple positions, builder validation) are raised
//! before any call is made. Remote failures are forwarded unchanged:
//! - the call-dispatch client's own error is wrapped in [`Error::Client`]
//! - an error payload returned by the remote function is kept as the raw
//!   wire value in [`Error::Remote`]

use tupleproxy_core::WireValue;

/// Result type alias for proxy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error produced by a call-dispatch client, passed through untouched.
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// Proxy operation errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Local | `Core`, `BuilderValidation`, `Config` | Raised before any I/O |
/// | Remote | `Remote`, `Client` | Forwarded as-is from the call path |
/// | Protocol | `UnexpectedResponse` | Result envelope has the wrong shape |
///
/// # Example
///
/// ```ignore
/// match operation.execute() {
///     Ok(tuples) => { /* handle rows */ }
///     Err(Error::Remote { payload }) => {
///         println!("crud error: {}", payload);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Conversion, position or field-name failure
    #[error(transparent)]
    Core(#[from] tupleproxy_core::Error),

    /// Required builder input missing or invalid
    #[error("invalid operation: {reason}")]
    BuilderValidation {
        /// Which input is missing and for which operation
        reason: String,
    },

    /// The remote function returned an error payload
    #[error("remote error: {payload}")]
    Remote {
        /// Error value exactly as the remote function returned it
        payload: WireValue,
    },

    /// The call-dispatch client failed
    #[error("call failed: {0}")]
    Client(#[source] ClientError),

    /// The result envelope does not have the expected shape
    #[error("unexpected response: {reason}")]
    UnexpectedResponse {
        /// How the response deviated from the expected shape
        reason: String,
    },

    /// Configuration could not be read or is invalid
    #[error("configuration error: {reason}")]
    Config {
        /// Parse, I/O or validation failure
        reason: String,
    },
}

impl Error {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Error::BuilderValidation {
            reason: reason.into(),
        }
    }

    pub(crate) fn unexpected(reason: impl Into<String>) -> Self {
        Error::UnexpectedResponse {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }
}
