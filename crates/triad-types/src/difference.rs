use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::FetchedEntity;

/// One leaf field divergence inside compared documents.
///
/// `values` is version-ordered; `None` marks a version where the field
/// (or the whole entity) is absent at this path. For a 2-way comparison
/// the vector has two entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDiff {
    /// Dotted/bracketed path to the diverging field, e.g. `items[2].price`.
    pub field_path: String,
    /// Each version's value at the path, in version order.
    #[serde(rename = "valuesByVersion")]
    pub values: Vec<Option<Value>>,
}

impl FieldDiff {
    pub fn new(field_path: impl Into<String>, values: Vec<Option<Value>>) -> Self {
        Self {
            field_path: field_path.into(),
            values,
        }
    }
}

/// Classification of a position where the versions are not all identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// At least one version has no entity at this position.
    Missing,
    /// All versions have an entity here but their content diverges.
    Different,
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKind::Missing => write!(f, "missing"),
            DiffKind::Different => write!(f, "different"),
        }
    }
}

/// One position where the compared versions disagree.
///
/// Produced by the positional diff engine and immutable afterwards.
/// Positions where every version carries identical content produce no
/// `Difference` at all.
#[derive(Clone, Debug, PartialEq)]
pub struct Difference {
    /// Display name for the position, e.g. `pos_04_address`.
    pub name: String,
    /// Index into the ordered entity sequences.
    pub position: usize,
    pub kind: DiffKind,
    /// Each version's entity at this position, in version order.
    pub entities: Vec<Option<FetchedEntity>>,
    /// Field-level breakdown; populated only for [`DiffKind::Different`].
    pub field_diffs: Vec<FieldDiff>,
}

impl Difference {
    /// Returns `true` if this position is missing in some version.
    pub fn is_missing(&self) -> bool {
        self.kind == DiffKind::Missing
    }

    /// Number of diverging leaf fields at this position.
    pub fn field_count(&self) -> usize {
        self.field_diffs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_diff_contract_keys_are_camel_case() {
        let fd = FieldDiff::new("address.city", vec![Some(json!("a")), Some(json!("b")), None]);
        let json = serde_json::to_value(&fd).unwrap();
        assert_eq!(json["fieldPath"], json!("address.city"));
        assert_eq!(json["valuesByVersion"], json!(["a", "b", null]));
    }

    #[test]
    fn diff_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(DiffKind::Missing).unwrap(), json!("missing"));
        assert_eq!(
            serde_json::to_value(DiffKind::Different).unwrap(),
            json!("different")
        );
    }

    #[test]
    fn diff_kind_display_matches_serde() {
        assert_eq!(DiffKind::Missing.to_string(), "missing");
        assert_eq!(DiffKind::Different.to_string(), "different");
    }

    #[test]
    fn difference_helpers() {
        let diff = Difference {
            name: "pos_00_x".into(),
            position: 0,
            kind: DiffKind::Different,
            entities: vec![None, None],
            field_diffs: vec![FieldDiff::new("x", vec![Some(json!(1)), Some(json!(2))])],
        };
        assert!(!diff.is_missing());
        assert_eq!(diff.field_count(), 1);
    }
}
