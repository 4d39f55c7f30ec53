use serde_json::Value;

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Native code may answer with `"true"`/`"false"` strings. Those map to the
/// matching boolean; anything else falls back to truthiness.
pub fn ensure_boolean(value: &Value) -> bool {
    match value.as_str() {
        Some("true") => true,
        Some("false") => false,
        _ => is_truthy(value),
    }
}
