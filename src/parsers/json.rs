//! Lenient accessors over a decoded JSON tree.
//!
//! None of these fail: a missing key or a value of the wrong type yields the
//! caller's default (or `None`).

use serde_json::{Map, Value};

/// String under `key`, or `default` when absent or not a string.
pub fn get_string<'a>(node: &'a Map<String, Value>, key: &str, default: &'a str) -> &'a str {
    node.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// Array under `key`, or `None` when absent or not an array.
pub fn get_array<'a>(node: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    node.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

/// The object-typed elements of `values`, skipping everything else.
pub fn objects(values: &[Value]) -> impl Iterator<Item = &Map<String, Value>> {
    values.iter().filter_map(Value::as_object)
}
