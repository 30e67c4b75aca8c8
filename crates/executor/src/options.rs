//! Operation options and the mixins that set them
//!
//! Every operation sends one options map as its last positional argument.
//! Each option family is a separate mixin trait; a builder implements only
//! the mixins its operation kind accepts, so setting e.g. a batch size on an
//! insert does not compile.
//!
//! ## Options
//!
//! | Mixin | Wire name | Wire value |
//! |-------|-----------|------------|
//! | [`WithBucketId`] | `bucket_id` | unsigned integer |
//! | [`WithTimeout`] | `timeout` | milliseconds |
//! | [`WithFields`] | `fields` | array of field names |
//! | [`WithBatchSize`] | `batch_size` | unsigned integer |
//! | [`WithMode`] | `mode` | `"read"` or `"write"` |
//! | [`WithStopOnError`] | `stop_on_error` | boolean |
//! | [`WithRollbackOnError`] | `rollback_on_error` | boolean |
//!
//! Setting an option again replaces only that option. Unset options are left
//! out of the map so the remote side applies its own default.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use tupleproxy_core::WireValue;

/// Wire name of the bucket id option.
pub const BUCKET_ID: &str = "bucket_id";
/// Wire name of the timeout option.
pub const TIMEOUT: &str = "timeout";
/// Wire name of the field projection option.
pub const FIELDS: &str = "fields";
/// Wire name of the batch size option.
pub const BATCH_SIZE: &str = "batch_size";
/// Wire name of the read mode option.
pub const MODE: &str = "mode";
/// Wire name of the stop-on-error option.
pub const STOP_ON_ERROR: &str = "stop_on_error";
/// Wire name of the rollback-on-error option.
pub const ROLLBACK_ON_ERROR: &str = "rollback_on_error";
/// Wire name of the select row limit.
pub const FIRST: &str = "first";

/// Named option values sent with one operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: BTreeMap<&'static str, WireValue>,
}

impl OptionSet {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value.
    pub fn set(&mut self, name: &'static str, value: WireValue) {
        self.entries.insert(name, value);
    }

    /// Current value of an option.
    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.entries.get(name)
    }

    /// Remove an option.
    pub fn remove(&mut self, name: &str) -> Option<WireValue> {
        self.entries.remove(name)
    }

    /// Check if an option is set
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no option is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &WireValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Encode as a string-keyed map.
    pub fn to_wire_value(&self) -> WireValue {
        WireValue::Map(
            self.entries
                .iter()
                .map(|(name, value)| (WireValue::from(*name), value.clone()))
                .collect(),
        )
    }
}

/// Which replica role may serve a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Any replica
    Read,
    /// The primary only
    Write,
}

impl ReadMode {
    /// Wire spelling of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadMode::Read => "read",
            ReadMode::Write => "write",
        }
    }
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access to an operation's option set; the base of every mixin.
pub trait OperationOptions: Sized {
    /// Options collected so far.
    fn options(&self) -> &OptionSet;

    /// Mutable access for mixin setters.
    fn options_mut(&mut self) -> &mut OptionSet;

    /// Set a raw option and return the builder.
    fn with_option(mut self, name: &'static str, value: WireValue) -> Self {
        self.options_mut().set(name, value);
        self
    }
}

/// Route the operation to the shard owning a bucket.
pub trait WithBucketId: OperationOptions {
    /// Set the `bucket_id` option.
    fn with_bucket_id(self, bucket_id: u64) -> Self {
        self.with_option(BUCKET_ID, WireValue::from(bucket_id))
    }
}

/// Bound the remote execution time.
pub trait WithTimeout: OperationOptions {
    /// Set the `timeout` option, sent in milliseconds.
    fn with_timeout(self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.with_option(TIMEOUT, WireValue::from(millis))
    }
}

/// Project returned records onto a subset of fields.
pub trait WithFields: OperationOptions {
    /// Set the `fields` option.
    fn with_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = fields
            .into_iter()
            .map(|name| WireValue::from(name.into()))
            .collect();
        self.with_option(FIELDS, WireValue::Array(names))
    }
}

/// Number of records fetched per internal batch.
pub trait WithBatchSize: OperationOptions {
    /// Set the `batch_size` option.
    fn with_batch_size(self, batch_size: u32) -> Self {
        self.with_option(BATCH_SIZE, WireValue::from(batch_size))
    }
}

/// Replica role allowed to serve the read.
pub trait WithMode: OperationOptions {
    /// Set the `mode` option.
    fn with_mode(self, mode: ReadMode) -> Self {
        self.with_option(MODE, WireValue::from(mode.as_str()))
    }
}

/// Stop a batch at its first failing record.
pub trait WithStopOnError: OperationOptions {
    /// Set the `stop_on_error` option.
    fn with_stop_on_error(self, stop: bool) -> Self {
        self.with_option(STOP_ON_ERROR, WireValue::from(stop))
    }
}

/// Roll back a batch when any record fails.
pub trait WithRollbackOnError: OperationOptions {
    /// Set the `rollback_on_error` option.
    fn with_rollback_on_error(self, rollback: bool) -> Self {
        self.with_option(ROLLBACK_ON_ERROR, WireValue::from(rollback))
    }
}
