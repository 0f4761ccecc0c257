//! Sparse per-version reconstruction of diverging fields.
//!
//! For compact reporting, each version gets one minimal document
//! containing only the fields that actually diverge at a position —
//! every field all versions agree on is omitted.

use serde_json::{Map, Value};

use triad_types::FieldDiff;

use crate::path::insert_at_path;

/// Build one sparse document per version from a position's field diffs.
///
/// A field appears in version `i`'s document when its value there differs
/// from at least one other version, or when any version is absent at that
/// path — absence itself is the signal, so such paths are always included
/// (as `null` for the absent versions).
pub fn render_minimal(field_diffs: &[FieldDiff], version_count: usize) -> Vec<Value> {
    let mut documents = vec![Value::Object(Map::new()); version_count];

    for field_diff in field_diffs {
        let any_absent = (0..version_count).any(|i| value_at(field_diff, i).is_none());

        for (i, document) in documents.iter_mut().enumerate() {
            let value = value_at(field_diff, i);
            let differs = (0..version_count)
                .filter(|&j| j != i)
                .any(|j| value_at(field_diff, j) != value);
            if differs || any_absent {
                insert_at_path(
                    document,
                    &field_diff.field_path,
                    value.cloned().unwrap_or(Value::Null),
                );
            }
        }
    }

    documents
}

fn value_at(field_diff: &FieldDiff, version: usize) -> Option<&Value> {
    field_diff.values.get(version).and_then(Option::as_ref)
}
