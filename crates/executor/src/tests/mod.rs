//! Test modules for the executor crate.


use std::sync::{Arc, Mutex};

use tupleproxy_core::WireValue;

use crate::{CallClient, ClientError};

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub function_name: String,
    pub arguments: Vec<WireValue>,
}

/// Call client that records every call and answers with a canned response.
pub struct RecordingClient {
    response: std::result::Result<WireValue, String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingClient {
    /// Answer every call with `[result]`.
    pub fn returning(result: WireValue) -> Arc<Self> {
        Self::responding(WireValue::Array(vec![result]))
    }

    /// Answer every call with the given raw response.
    pub fn responding(response: WireValue) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Fail every call with a transport error.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CallClient for RecordingClient {
    fn call(
        &self,
        function_name: &str,
        arguments: Vec<WireValue>,
    ) -> std::result::Result<WireValue, ClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            function_name: function_name.to_string(),
            arguments,
        });
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(message.clone().into()),
        }
    }
}

/// A `[id, name]` record.
pub fn row(id: i64, name: &str) -> WireValue {
    WireValue::Array(vec![WireValue::from(id), WireValue::from(name)])
}

/// Look up an entry of a string-keyed wire map.
pub fn map_get<'a>(map: &'a WireValue, key: &str) -> Option<&'a WireValue> {
    match map {
        WireValue::Map(entries) => entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v),
        _ => None,
    }
}
