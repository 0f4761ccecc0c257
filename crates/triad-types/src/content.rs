use serde_json::Value;

/// Decoded payload returned by a gateway fetch.
///
/// Gateways attempt a JSON decode and fall back to raw text, so every
/// successful fetch is one of these two shapes. Absence (all mirrors
/// exhausted) is modeled as `Option<Content>` by the caller, never as an
/// error.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// The body decoded as structured JSON.
    Json(Value),
    /// The body as raw text (not valid JSON).
    Text(String),
}

impl Content {
    /// Canonical string form used for the raw-equality short-circuit.
    ///
    /// JSON content serializes through `serde_json`, whose maps are
    /// key-sorted, so two documents differing only in key order produce
    /// the same canonical string. Text content is compared byte-exact.
    pub fn canonical_string(&self) -> String {
        match self {
            Content::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Content::Text(text) => text.clone(),
        }
    }

    /// The structured form used for recursive field diffing.
    ///
    /// Text content becomes a JSON string value so every entity diffs
    /// through the same code path.
    pub fn into_value(self) -> Value {
        match self {
            Content::Json(value) => value,
            Content::Text(text) => Value::String(text),
        }
    }

    /// Returns `true` if the content decoded as JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, Content::Json(_))
    }
}
