//! Field path plumbing.
//!
//! Diff paths are dotted with bracketed numeric indices, e.g.
//! `address.city` or `items[2].price`. The renderer rebuilds sparse
//! documents from these paths, so parsing here must accept exactly what
//! [`structural_diff`] emits — including chained indices (`grid[1][2]`)
//! and a bare index at the document root (`[0]`).
//!
//! [`structural_diff`]: crate::structural::structural_diff

use serde_json::{Map, Value};

/// One dot-separated path segment: a key plus any bracketed indices.
///
/// The key may be empty for a root-level array path such as `[0]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegment {
    pub key: String,
    pub indices: Vec<usize>,
}

/// Parse a field path into segments.
///
/// A segment whose bracket content is not a valid index is kept verbatim
/// as a key, so an unexpected path degrades to a literal key rather than
/// being dropped.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    path.split('.').map(parse_segment).collect()
}

fn parse_segment(part: &str) -> PathSegment {
    let Some(bracket) = part.find('[') else {
        return PathSegment {
            key: part.to_string(),
            indices: Vec::new(),
        };
    };

    let key = &part[..bracket];
    let mut indices = Vec::new();
    let mut rest = &part[bracket..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            break;
        };
        let Ok(index) = stripped[..close].parse::<usize>() else {
            break;
        };
        indices.push(index);
        rest = &stripped[close + 1..];
    }

    if rest.is_empty() {
        PathSegment {
            key: key.to_string(),
            indices,
        }
    } else {
        // Malformed bracket content: fall back to the literal part.
        PathSegment {
            key: part.to_string(),
            indices: Vec::new(),
        }
    }
}

/// Set `value` at `path` inside `root`, creating intermediate objects and
/// null-padded arrays as needed.
pub fn insert_at_path(root: &mut Value, path: &str, value: Value) {
    *slot_at_path(root, path) = value;
}

fn slot_at_path<'a>(root: &'a mut Value, path: &str) -> &'a mut Value {
    let mut current = root;
    for segment in parse_path(path) {
        if !segment.key.is_empty() {
            current = descend_key(current, &segment.key);
        }
        for index in segment.indices {
            current = descend_index(current, index);
        }
    }
    current
}

fn descend_key<'a>(current: &'a mut Value, key: &str) -> &'a mut Value {
    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    current
        .as_object_mut()
        .expect("coerced to object")
        .entry(key.to_string())
        .or_insert(Value::Null)
}

fn descend_index(current: &mut Value, index: usize) -> &mut Value {
    if !current.is_array() {
        *current = Value::Array(Vec::new());
    }
    let items = current.as_array_mut().expect("coerced to array");
    while items.len() <= index {
        items.push(Value::Null);
    }
    &mut items[index]
}
