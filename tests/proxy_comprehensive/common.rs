//! Common test utilities for proxy tests

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use tupleproxy::{
    CallClient, ClientError, ConverterRegistry, DefaultConverterFactory, FieldMetadata,
    InMemoryMetadataProvider, ProxyClient, SpaceMetadata, WireValue,
};

/// Field names and types of the `books` space.
pub const BOOKS_FORMAT: [(&str, &str); 4] = [
    ("id", "unsigned"),
    ("bucket_id", "unsigned"),
    ("book_name", "string"),
    ("author", "string"),
];

/// Shared complex registry
pub fn complex_registry() -> Arc<ConverterRegistry> {
    Arc::new(DefaultConverterFactory::complex())
}

/// Metadata of the `books` space
pub fn books_metadata() -> SpaceMetadata {
    SpaceMetadata::new(
        "books",
        BOOKS_FORMAT
            .iter()
            .map(|(name, ty)| FieldMetadata::new(*name, *ty))
            .collect(),
    )
}

/// Proxy client over a fresh crud fake, with `books` metadata known
pub fn create_proxy() -> (ProxyClient, Arc<FakeCrud>) {
    let crud = Arc::new(FakeCrud::default());
    let provider = InMemoryMetadataProvider::new().with_space(books_metadata());
    let proxy = ProxyClient::new(crud.clone()).with_metadata_provider(Arc::new(provider));
    (proxy, crud)
}

/// Look up an entry of a string-keyed wire map
pub fn map_get<'a>(map: &'a WireValue, key: &str) -> Option<&'a WireValue> {
    match map {
        WireValue::Map(entries) => entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v),
        _ => None,
    }
}

/// In-memory stand-in for the crud proxy functions of one `books` space.
///
/// Rows are keyed by their first field. Responses use the crud
/// `{metadata, rows}` result form.
#[derive(Default)]
pub struct FakeCrud {
    rows: Mutex<Vec<WireValue>>,
    calls: Mutex<Vec<(String, Vec<WireValue>)>>,
}

impl FakeCrud {
    /// Every call received so far
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<(String, Vec<WireValue>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of stored rows
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn dispatch(&self, function_name: &str, arguments: &[WireValue]) -> WireValue {
        if arguments.first().and_then(WireValue::as_str) != Some("books") {
            return failure("Space doesn't exist");
        }
        let payload = arguments.get(1).cloned().unwrap_or(WireValue::Nil);
        let options = arguments.get(2).cloned().unwrap_or(WireValue::Nil);
        let mut rows = self.rows.lock().unwrap();

        match function_name {
            "crud.insert" => match insert(&mut rows, payload.clone()) {
                Ok(()) => success(vec![payload]),
                Err(message) => failure(&message),
            },
            "crud.replace" => {
                replace(&mut rows, payload.clone());
                success(vec![payload])
            }
            "crud.insert_many" | "crud.replace_many" => {
                let batch = payload.as_array().cloned().unwrap_or_default();
                let stop_on_error = map_get(&options, "stop_on_error")
                    .and_then(WireValue::as_bool)
                    .unwrap_or(false);
                let mut written = Vec::new();
                let mut errors = Vec::new();
                for row in batch {
                    if function_name == "crud.replace_many" {
                        replace(&mut rows, row.clone());
                        written.push(row);
                        continue;
                    }
                    match insert(&mut rows, row.clone()) {
                        Ok(()) => written.push(row),
                        Err(message) => {
                            errors.push(error_payload(&message));
                            if stop_on_error {
                                break;
                            }
                        }
                    }
                }
                let result = crud_result(written);
                if errors.is_empty() {
                    WireValue::Array(vec![result])
                } else {
                    WireValue::Array(vec![result, WireValue::Array(errors)])
                }
            }
            "crud.delete" => {
                let key = payload.as_array().and_then(|k| k.first()).cloned();
                let position = rows
                    .iter()
                    .position(|row| primary_key(row) == key.as_ref());
                match position {
                    Some(index) => success(vec![rows.remove(index)]),
                    None => success(Vec::new()),
                }
            }
            "crud.select" => {
                let conditions = payload.as_array().cloned().unwrap_or_default();
                let first = map_get(&options, "first")
                    .and_then(WireValue::as_u64)
                    .map(|n| n as usize)
                    .unwrap_or(usize::MAX);
                let mut matched: Vec<WireValue> = rows
                    .iter()
                    .filter(|row| conditions.iter().all(|c| matches(row, c)))
                    .cloned()
                    .collect();
                matched.sort_by_key(|row| primary_key(row).and_then(WireValue::as_i64));
                matched.truncate(first);
                success(matched)
            }
            other => failure(&format!("Procedure '{}' is not defined", other)),
        }
    }
}

impl CallClient for FakeCrud {
    fn call(
        &self,
        function_name: &str,
        arguments: Vec<WireValue>,
    ) -> Result<WireValue, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((function_name.to_string(), arguments.clone()));
        Ok(self.dispatch(function_name, &arguments))
    }
}

fn primary_key(row: &WireValue) -> Option<&WireValue> {
    row.as_array().and_then(|fields| fields.first())
}

fn insert(rows: &mut Vec<WireValue>, row: WireValue) -> Result<(), String> {
    if rows.iter().any(|r| primary_key(r) == primary_key(&row)) {
        return Err("Duplicate key exists in unique index \"primary_index\"".to_string());
    }
    rows.push(row);
    Ok(())
}

fn replace(rows: &mut Vec<WireValue>, row: WireValue) {
    rows.retain(|r| primary_key(r) != primary_key(&row));
    rows.push(row);
}

fn matches(row: &WireValue, condition: &WireValue) -> bool {
    let parts = match condition.as_array() {
        Some(parts) if parts.len() == 3 => parts,
        _ => return false,
    };
    let (op, field, expected) = (parts[0].as_str(), parts[1].as_str(), &parts[2]);
    let position = match BOOKS_FORMAT.iter().position(|(name, _)| Some(*name) == field) {
        Some(position) => position,
        None => return false,
    };
    let actual = match row.as_array().and_then(|fields| fields.get(position)) {
        Some(actual) => actual,
        None => return false,
    };
    let ordering = match (actual, expected) {
        (WireValue::Integer(a), WireValue::Integer(b)) => a.as_i64().cmp(&b.as_i64()),
        (WireValue::String(a), WireValue::String(b)) => a.as_str().cmp(&b.as_str()),
        _ => return false,
    };
    match op {
        Some("=") => ordering == Ordering::Equal,
        Some("<") => ordering == Ordering::Less,
        Some("<=") => ordering != Ordering::Greater,
        Some(">") => ordering == Ordering::Greater,
        Some(">=") => ordering != Ordering::Less,
        _ => false,
    }
}

fn format_wire() -> WireValue {
    WireValue::Array(
        BOOKS_FORMAT
            .iter()
            .map(|(name, ty)| {
                WireValue::Map(vec![
                    (WireValue::from("name"), WireValue::from(*name)),
                    (WireValue::from("type"), WireValue::from(*ty)),
                    (WireValue::from("is_nullable"), WireValue::from(false)),
                ])
            })
            .collect(),
    )
}

fn crud_result(rows: Vec<WireValue>) -> WireValue {
    WireValue::Map(vec![
        (WireValue::from("metadata"), format_wire()),
        (WireValue::from("rows"), WireValue::Array(rows)),
    ])
}

fn error_payload(message: &str) -> WireValue {
    WireValue::Map(vec![
        (WireValue::from("class_name"), WireValue::from("CrudError")),
        (WireValue::from("err"), WireValue::from(message)),
    ])
}

fn success(rows: Vec<WireValue>) -> WireValue {
    WireValue::Array(vec![crud_result(rows)])
}

fn failure(message: &str) -> WireValue {
    WireValue::Array(vec![WireValue::Nil, error_payload(message)])
}
