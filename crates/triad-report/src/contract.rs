//! The machine-readable comparison contract.
//!
//! Consumers parse these documents instead of the markdown report, so the
//! key names are part of the external interface and use camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use triad_diff::render_minimal;
use triad_types::{Cid, DiffKind, Difference, FetchedEntity, FieldDiff};

/// Top-level comparison document, three-way or pairwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDocument {
    /// ISO-8601 generation timestamp.
    pub generated: String,
    /// The compared root identifiers, in version order.
    pub hashes: Vec<String>,
    pub total_differences: usize,
    pub differences: Vec<DifferenceRecord>,
}

impl ComparisonDocument {
    pub fn new(generated: String, hashes: &[Cid], differences: &[Difference]) -> Self {
        let version_count = hashes.len();
        Self {
            generated,
            hashes: hashes.iter().map(|h| h.to_string()).collect(),
            total_differences: differences.len(),
            differences: differences
                .iter()
                .map(|d| DifferenceRecord::from_difference(d, version_count))
                .collect(),
        }
    }
}

/// One divergent position in the contract.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferenceRecord {
    pub name: String,
    pub position: usize,
    pub kind: DiffKind,
    /// Field-level breakdown; present only for `different` positions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_differences: Vec<FieldDiff>,
    /// One sparse document per version, restricted to diverging fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minimal_by_version: Vec<Value>,
    /// Entity identity at this position per version; `null` marks absence.
    pub entities: Vec<Option<EntityRef>>,
}

impl DifferenceRecord {
    pub fn from_difference(difference: &Difference, version_count: usize) -> Self {
        let (field_differences, minimal_by_version) = match difference.kind {
            DiffKind::Different => (
                difference.field_diffs.clone(),
                render_minimal(&difference.field_diffs, version_count),
            ),
            DiffKind::Missing => (Vec::new(), Vec::new()),
        };
        Self {
            name: difference.name.clone(),
            position: difference.position,
            kind: difference.kind,
            field_differences,
            minimal_by_version,
            entities: difference
                .entities
                .iter()
                .map(|e| e.as_ref().map(EntityRef::from_entity))
                .collect(),
        }
    }
}

/// Entity identity carried into the contract (content is deliberately
/// not repeated here; the minimal documents cover what diverged).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub name: String,
    pub url: String,
}

impl EntityRef {
    fn from_entity(entity: &FetchedEntity) -> Self {
        Self {
            name: entity.name.clone(),
            url: entity.url.clone(),
        }
    }
}
