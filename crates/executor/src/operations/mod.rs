//! One builder per operation kind
//!
//! | Builder | Payload | Mixins |
//! |---------|---------|--------|
//! | [`InsertBuilder`] | one tuple | timeout, fields |
//! | [`ReplaceBuilder`] | one tuple | timeout, fields |
//! | [`InsertManyBuilder`] | array of tuples | timeout, fields, stop_on_error, rollback_on_error |
//! | [`ReplaceManyBuilder`] | array of tuples | timeout, fields, stop_on_error, rollback_on_error |
//! | [`DeleteBuilder`] | index key | bucket_id, timeout, fields |
//! | [`SelectBuilder`] | conditions | bucket_id, timeout, fields, batch_size, mode |

mod delete;
mod insert;
mod insert_many;
mod replace;
mod replace_many;
mod select;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use insert_many::InsertManyBuilder;
pub use replace::ReplaceBuilder;
pub use replace_many::ReplaceManyBuilder;
pub use select::SelectBuilder;

use tupleproxy_core::{Tuple, WireValue};

use crate::error::{Error, Result};

fn single_tuple_payload(kind: &str, tuple: Option<&Tuple>) -> Result<WireValue> {
    tuple
        .map(Tuple::to_wire_value)
        .ok_or_else(|| Error::validation(format!("{kind}: tuple must be set")))
}

fn many_tuples_payload(kind: &str, tuples: &[Tuple]) -> Result<WireValue> {
    if tuples.is_empty() {
        return Err(Error::validation(format!("{kind}: at least one tuple is required")));
    }
    Ok(WireValue::Array(
        tuples.iter().map(Tuple::to_wire_value).collect(),
    ))
}
