use serde_json::Value;

/// Decode a wire pointer into its CID.
///
/// The wire format allows two shapes: a link object `{"/": "Qm..."}` or a
/// bare CID string. Anything else (including an empty CID) is not a
/// pointer and yields `None`.
pub fn decode_pointer(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        Value::Object(map) => map
            .get("/")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}
