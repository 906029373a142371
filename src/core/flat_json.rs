//! Flat JSON handling: parsing, flatness checks, record extraction and a
//! deterministic pretty-printer.
//!
//! "Flat" means an object, or an array of objects, whose values are all
//! scalars. Nested arrays/objects are rejected rather than stringified.

use crate::domain::model::FlatRecord;
use crate::utils::error::TransformError;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value};

pub fn parse_json(text: &str) -> Result<Value, TransformError> {
    serde_json::from_str(text)
        .map_err(|err| TransformError::invalid_input(format!("Input is not valid JSON: {}", err)))
}

/// Extracts one flat record per object, preserving array order.
pub fn extract_flat_objects(value: &Value) -> Result<Vec<FlatRecord>, TransformError> {
    match value {
        Value::Object(map) => Ok(vec![flatten_object(map)?]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| flatten_object(as_object(index, item)?))
            .collect(),
        _ => Err(not_object_or_array()),
    }
}

/// Same structural rule as [`extract_flat_objects`] without building records.
pub fn validate_flat_json(value: &Value) -> Result<(), TransformError> {
    match value {
        Value::Object(map) => validate_flat_object(map),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| validate_flat_object(as_object(index, item)?)),
        _ => Err(not_object_or_array()),
    }
}

/// Pretty-prints with two-space indentation and object keys sorted at every level.
pub fn render(value: &Value) -> Result<String, TransformError> {
    serde_json::to_string_pretty(&SortedKeys(value))
        .map_err(|err| TransformError::internal(format!("Could not encode JSON output: {}", err)))
}

/// Builds the JSON array emitted by the CSV -> JSON conversion.
pub fn records_to_value(records: &[FlatRecord]) -> Value {
    Value::Array(
        records
            .iter()
            .map(|record| {
                let map: Map<String, Value> = record
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                    .collect();
                Value::Object(map)
            })
            .collect(),
    )
}

/// boolean -> "true"/"false", null -> "", number -> canonical decimal, string as-is
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Integral floats inside the i64 range print without a fraction (`1e3` -> `1000`).
pub fn number_to_string(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

fn flatten_object(map: &Map<String, Value>) -> Result<FlatRecord, TransformError> {
    map.iter()
        .map(|(key, value)| {
            scalar_to_string(value)
                .map(|text| (key.clone(), text))
                .ok_or_else(|| nested_value(key))
        })
        .collect()
}

fn validate_flat_object(map: &Map<String, Value>) -> Result<(), TransformError> {
    match map
        .iter()
        .find(|(_, value)| matches!(value, Value::Array(_) | Value::Object(_)))
    {
        Some((key, _)) => Err(nested_value(key)),
        None => Ok(()),
    }
}

fn as_object(index: usize, item: &Value) -> Result<&Map<String, Value>, TransformError> {
    item.as_object().ok_or_else(|| {
        TransformError::invalid_input(format!("Array item {} is not a JSON object.", index + 1))
    })
}

fn not_object_or_array() -> TransformError {
    TransformError::invalid_input("JSON must be an object or array of objects.")
}

fn nested_value(key: &str) -> TransformError {
    TransformError::invalid_input(format!(
        "Only flat JSON is supported. Field '{}' contains a nested value.",
        key
    ))
}

/// Serializes a `Value` with object entries emitted in sorted key order,
/// whatever order the underlying `Map` iterates in.
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&SortedKeys(item))?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, &SortedKeys(value))?;
                }
                out.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}
