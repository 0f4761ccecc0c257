//! Recursive minimal field diff.
//!
//! Walks 2 or 3 parsed documents in parallel and emits one [`FieldDiff`]
//! per diverging leaf. Parent paths are never emitted once children are
//! enumerated, so the result is the minimal set of paths explaining the
//! divergence. Equality is exact structural value equality after
//! decoding; numbers and strings are never normalized.

use std::collections::BTreeSet;

use serde_json::Value;

use triad_types::FieldDiff;

/// Path used when documents diverge at their very top and there is no
/// field to name.
pub const ROOT_PATH: &str = "root";

/// Compute the minimal set of diverging leaf fields.
///
/// `values` holds each version's parsed document (`None` = absent) in
/// version order. Absent versions participate: a field present in one
/// version and absent in another is a divergence.
pub fn structural_diff(values: &[Option<&Value>]) -> Vec<FieldDiff> {
    let mut diffs = Vec::new();
    diff_values(values, "", &mut diffs);
    diffs
}

fn diff_values(values: &[Option<&Value>], path: &str, out: &mut Vec<FieldDiff>) {
    if all_equal(values) {
        return;
    }

    if all_present(values, Value::is_object) {
        // Union of keys across all versions, in stable (sorted) order.
        let keys: BTreeSet<&str> = values
            .iter()
            .flatten()
            .filter_map(|v| v.as_object())
            .flat_map(|map| map.keys().map(String::as_str))
            .collect();

        for key in keys {
            let children: Vec<Option<&Value>> =
                values.iter().map(|v| v.and_then(|v| v.get(key))).collect();
            if all_equal(&children) {
                continue;
            }
            let child_path = if path.is_empty() {
                key.to_string()
            } else {
                format!("{path}.{key}")
            };
            diff_values(&children, &child_path, out);
        }
    } else if all_present(values, Value::is_array) {
        let max_len = values
            .iter()
            .flatten()
            .filter_map(|v| v.as_array())
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        for index in 0..max_len {
            let children: Vec<Option<&Value>> = values
                .iter()
                .map(|v| v.and_then(|v| v.as_array()).and_then(|a| a.get(index)))
                .collect();
            if all_equal(&children) {
                continue;
            }
            diff_values(&children, &format!("{path}[{index}]"), out);
        }
    } else {
        // Scalar, shape mismatch, or absent-vs-present: a leaf divergence.
        let leaf_path = if path.is_empty() { ROOT_PATH } else { path };
        out.push(FieldDiff::new(
            leaf_path,
            values.iter().map(|v| v.cloned()).collect(),
        ));
    }
}

/// All slots equal, absence included (`None == None`).
fn all_equal(values: &[Option<&Value>]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Every present value satisfies the predicate. Absent slots are ignored;
/// all-absent never reaches here because it is equal.
fn all_present(values: &[Option<&Value>], predicate: fn(&Value) -> bool) -> bool {
    values.iter().flatten().all(|&v| predicate(v))
}
