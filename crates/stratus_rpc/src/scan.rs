//! Output detection.

use crate::value::Value;

/// Returns `true` if `value` is, or structurally contains, an output.
///
/// Arrays and objects are searched recursively. Resource handles are opaque:
/// their own fields may hold outputs but are never inspected.
#[must_use]
pub fn contains_outputs(value: &Value) -> bool {
    match value {
        Value::Output(_) => true,
        Value::Array(items) => items.iter().any(contains_outputs),
        Value::Object(fields) => fields.values().any(contains_outputs),
        Value::Resource(_)
        | Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_) => false,
    }
}
