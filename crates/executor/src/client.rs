//! The call-dispatch seam
//!
//! Transport, pooling and failover live behind [`CallClient`]. An operation
//! hands it a function name and positional arguments and gets back the
//! function's return values as one array-kind wire value.

use tupleproxy_core::WireValue;

use crate::error::ClientError;

/// Executes a remote function call.
///
/// Implementations must be `Send + Sync`; one client is shared by every
/// operation built from a [`ProxyClient`](crate::ProxyClient).
pub trait CallClient: Send + Sync {
    /// Call `function_name` with positional `arguments`.
    ///
    /// Returns the array of values the function returned.
    fn call(&self, function_name: &str, arguments: Vec<WireValue>)
        -> Result<WireValue, ClientError>;
}

impl<F> CallClient for F
where
    F: Fn(&str, Vec<WireValue>) -> Result<WireValue, ClientError> + Send + Sync,
{
    fn call(
        &self,
        function_name: &str,
        arguments: Vec<WireValue>,
    ) -> Result<WireValue, ClientError> {
        self(function_name, arguments)
    }
}
