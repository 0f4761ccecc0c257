use std::time::Duration;

use crate::cid::Cid;
use crate::difference::{DiffKind, Difference};
use crate::entity::{EntityLocation, FetchedEntity};

/// Wall-clock durations of the two network phases of one analysis run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseTiming {
    /// Link collection across all hashes.
    pub collect: Duration,
    /// Entity content fetch across all hashes.
    pub fetch: Duration,
}

impl PhaseTiming {
    /// Combined duration of both phases.
    pub fn total(&self) -> Duration {
        self.collect + self.fetch
    }
}

/// Aggregate output of one analysis invocation.
///
/// Owned by the orchestrator for the lifetime of a run and consumed by
/// report generation; the reports are the durable output.
///
/// Invariant: `link_sets[i].len() == entity_sets[i].len()` for every
/// version `i`, and `entity_sets[i][p]` corresponds to `link_sets[i][p]`.
#[derive(Clone, Debug)]
pub struct AnalysisResult {
    /// The compared root identifiers, in input order.
    pub hashes: Vec<Cid>,
    /// Per version, the ordered entity locations discovered from its root.
    pub link_sets: Vec<Vec<EntityLocation>>,
    /// Per version, the ordered fetched entities (empty slot = fetch failed).
    pub entity_sets: Vec<Vec<Option<FetchedEntity>>>,
    /// Positions where the versions disagree.
    pub differences: Vec<Difference>,
    pub timing: PhaseTiming,
}

impl AnalysisResult {
    /// Number of compared versions (2 or 3).
    pub fn version_count(&self) -> usize {
        self.hashes.len()
    }

    /// Longest entity sequence across all versions.
    pub fn max_positions(&self) -> usize {
        self.entity_sets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns `true` if all versions agree at every position.
    pub fn is_consistent(&self) -> bool {
        self.differences.is_empty()
    }

    /// Number of positions missing in some version.
    pub fn missing_count(&self) -> usize {
        self.differences
            .iter()
            .filter(|d| d.kind == DiffKind::Missing)
            .count()
    }

    /// Number of positions with diverging content.
    pub fn different_count(&self) -> usize {
        self.differences
            .iter()
            .filter(|d| d.kind == DiffKind::Different)
            .count()
    }

    /// Total diverging leaf fields across all positions.
    pub fn total_field_diffs(&self) -> usize {
        self.differences.iter().map(Difference::field_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difference::FieldDiff;
    use serde_json::json;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            hashes: vec![Cid::parse("QmA").unwrap(), Cid::parse("QmB").unwrap()],
            link_sets: vec![
                vec![EntityLocation::new("a", "u1"), EntityLocation::new("b", "u2")],
                vec![EntityLocation::new("a", "u3")],
            ],
            entity_sets: vec![vec![None, None], vec![None]],
            differences: vec![
                Difference {
                    name: "pos_00_a".into(),
                    position: 0,
                    kind: DiffKind::Different,
                    entities: vec![None, None],
                    field_diffs: vec![
                        FieldDiff::new("x", vec![Some(json!(1)), Some(json!(2))]),
                        FieldDiff::new("y", vec![Some(json!(3)), None]),
                    ],
                },
                Difference {
                    name: "pos_01_b".into(),
                    position: 1,
                    kind: DiffKind::Missing,
                    entities: vec![None, None],
                    field_diffs: vec![],
                },
            ],
            timing: PhaseTiming::default(),
        }
    }

    #[test]
    fn counts_by_kind() {
        let result = sample_result();
        assert_eq!(result.missing_count(), 1);
        assert_eq!(result.different_count(), 1);
        assert_eq!(result.total_field_diffs(), 2);
        assert!(!result.is_consistent());
    }

    #[test]
    fn max_positions_is_longest_set() {
        assert_eq!(sample_result().max_positions(), 2);
    }

    #[test]
    fn timing_total_sums_phases() {
        let timing = PhaseTiming {
            collect: Duration::from_secs(2),
            fetch: Duration::from_secs(3),
        };
        assert_eq!(timing.total(), Duration::from_secs(5));
    }
}
