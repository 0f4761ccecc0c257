//! Position-by-position comparison of ordered entity sequences.
//!
//! Position is the only cross-version join key: entity names are
//! version-local labels and are never used for matching. A position where
//! any version has no entity is `Missing`; a position where every version
//! has an entity but content diverges is `Different` with a minimal
//! field-level breakdown; identical positions produce nothing.

use serde_json::Value;

use triad_types::{DiffKind, Difference, FetchedEntity};

use crate::error::{DiffError, DiffResult};
use crate::structural::structural_diff;

/// Diff 2 or 3 ordered entity sequences.
///
/// The fast path compares canonical raw content; only positions that fail
/// that short-circuit pay for the recursive field diff. A raw mismatch
/// that yields no leaf divergence (key order only) emits nothing.
pub fn diff_entity_sets(sets: &[Vec<Option<FetchedEntity>>]) -> DiffResult<Vec<Difference>> {
    if !(2..=3).contains(&sets.len()) {
        return Err(DiffError::InvalidVersionCount(sets.len()));
    }

    let max_len = sets.iter().map(Vec::len).max().unwrap_or(0);
    let mut differences = Vec::new();

    for position in 0..max_len {
        let entities: Vec<Option<&FetchedEntity>> = sets
            .iter()
            .map(|set| set.get(position).and_then(Option::as_ref))
            .collect();
        let name = position_name(position, &entities);

        if entities.iter().any(Option::is_none) {
            differences.push(Difference {
                name,
                position,
                kind: DiffKind::Missing,
                entities: to_owned(&entities),
                field_diffs: Vec::new(),
            });
            continue;
        }

        if all_raw_equal(&entities) {
            continue;
        }

        let parsed: Vec<Option<&Value>> = entities
            .iter()
            .map(|e| e.map(|entity| &entity.parsed))
            .collect();
        let field_diffs = structural_diff(&parsed);
        if field_diffs.is_empty() {
            continue;
        }

        differences.push(Difference {
            name,
            position,
            kind: DiffKind::Different,
            entities: to_owned(&entities),
            field_diffs,
        });
    }

    Ok(differences)
}

/// Display name for a position: its index plus the first present
/// version's label, e.g. `pos_04_address`.
fn position_name(position: usize, entities: &[Option<&FetchedEntity>]) -> String {
    match entities.iter().flatten().next() {
        Some(entity) => format!("pos_{position:02}_{}", entity.name),
        None => format!("pos_{position:02}_empty"),
    }
}

fn all_raw_equal(entities: &[Option<&FetchedEntity>]) -> bool {
    entities
        .windows(2)
        .all(|pair| match (pair[0], pair[1]) {
            (Some(a), Some(b)) => a.raw == b.raw,
            _ => false,
        })
}

fn to_owned(entities: &[Option<&FetchedEntity>]) -> Vec<Option<FetchedEntity>> {
    entities.iter().map(|e| e.cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triad_types::{Content, EntityLocation};

    fn entity(name: &str, value: Value) -> FetchedEntity {
        let location = EntityLocation::new(name, format!("https://ipfs.io/ipfs/{name}"));
        FetchedEntity::new(&location, Content::Json(value))
    }

    fn set(values: Vec<Value>) -> Vec<Option<FetchedEntity>> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Some(entity(&format!("entity_{i:03}"), v)))
            .collect()
    }

    #[test]
    fn identical_sets_have_no_differences() {
        let a = set(vec![json!({"x": 1}), json!({"y": 2})]);
        let differences = diff_entity_sets(&[a.clone(), a.clone(), a]).unwrap();
        assert!(differences.is_empty());
    }

    #[test]
    fn self_diff_is_idempotent_with_nested_content() {
        let a = set(vec![json!({"a": {"b": [1, 2, {"c": 3}]}})]);
        let differences = diff_entity_sets(&[a.clone(), a.clone(), a]).unwrap();
        assert!(differences.is_empty());
    }

    #[test]
    fn scalar_field_divergence() {
        let a = set(vec![json!({"x": 1})]);
        let b = set(vec![json!({"x": 2})]);
        let c = set(vec![json!({"x": 1})]);

        let differences = diff_entity_sets(&[a, b, c]).unwrap();
        assert_eq!(differences.len(), 1);
        let diff = &differences[0];
        assert_eq!(diff.position, 0);
        assert_eq!(diff.kind, DiffKind::Different);
        assert_eq!(diff.field_diffs.len(), 1);
        assert_eq!(diff.field_diffs[0].field_path, "x");
        assert_eq!(
            diff.field_diffs[0].values,
            vec![Some(json!(1)), Some(json!(2)), Some(json!(1))]
        );
    }

    #[test]
    fn nested_divergence_names_leaf_only() {
        let a = set(vec![json!({"a": {"b": 1}})]);
        let b = set(vec![json!({"a": {"b": 1}})]);
        let c = set(vec![json!({"a": {"b": 2}})]);

        let differences = diff_entity_sets(&[a, b, c]).unwrap();
        assert_eq!(differences.len(), 1);
        let paths: Vec<&str> = differences[0]
            .field_diffs
            .iter()
            .map(|fd| fd.field_path.as_str())
            .collect();
        assert_eq!(paths, vec!["a.b"]);
        assert_eq!(
            differences[0].field_diffs[0].values,
            vec![Some(json!(1)), Some(json!(1)), Some(json!(2))]
        );
    }

    #[test]
    fn shorter_sets_report_missing_tail_positions() {
        let long = set(vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);
        let short = set(vec![json!(1), json!(2), json!(3)]);

        let differences =
            diff_entity_sets(&[long, short.clone(), short]).unwrap();
        assert_eq!(differences.len(), 2);
        assert_eq!(differences[0].position, 3);
        assert_eq!(differences[0].kind, DiffKind::Missing);
        assert_eq!(differences[1].position, 4);
        assert_eq!(differences[1].kind, DiffKind::Missing);
    }

    #[test]
    fn empty_slot_is_missing_even_with_equal_length_sets() {
        let a = set(vec![json!({"x": 1})]);
        let mut b = set(vec![json!({"x": 1})]);
        b[0] = None;

        let differences = diff_entity_sets(&[a.clone(), b, a]).unwrap();
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].kind, DiffKind::Missing);
        assert!(differences[0].field_diffs.is_empty());
    }

    #[test]
    fn missing_positions_skip_field_diffing() {
        let a = set(vec![json!({"x": 1})]);
        let b: Vec<Option<FetchedEntity>> = Vec::new();
        let differences = diff_entity_sets(&[a, b]).unwrap();
        assert_eq!(differences.len(), 1);
        assert!(differences[0].is_missing());
        assert!(differences[0].field_diffs.is_empty());
    }

    #[test]
    fn two_way_array_tail_divergence() {
        let a = set(vec![json!({"items": [1, 2]})]);
        let b = set(vec![json!({"items": [1]})]);

        let differences = diff_entity_sets(&[a, b]).unwrap();
        assert_eq!(differences.len(), 1);
        let fd = &differences[0].field_diffs[0];
        assert_eq!(fd.field_path, "items[1]");
        assert_eq!(fd.values, vec![Some(json!(2)), None]);
    }

    #[test]
    fn key_order_only_mismatch_emits_nothing() {
        // Raw forms are canonical, so a key-order difference never even
        // reaches the recursive diff; build entities with distinct raw
        // strings but equal parsed values to exercise the guard.
        let location = EntityLocation::new("e", "u");
        let a = FetchedEntity {
            name: location.name.clone(),
            url: location.url.clone(),
            raw: "{\"a\":1,\"b\":2}".into(),
            parsed: json!({"a": 1, "b": 2}),
        };
        let b = FetchedEntity {
            raw: "{\"b\":2,\"a\":1}".into(),
            ..a.clone()
        };
        let differences = diff_entity_sets(&[vec![Some(a)], vec![Some(b)]]).unwrap();
        assert!(differences.is_empty());
    }

    #[test]
    fn position_names_use_first_present_label() {
        let a = set(vec![json!({"x": 1})]);
        let b = set(vec![json!({"x": 2})]);
        let differences = diff_entity_sets(&[a, b]).unwrap();
        assert_eq!(differences[0].name, "pos_00_entity_000");
    }

    #[test]
    fn version_count_is_validated() {
        let a = set(vec![json!(1)]);
        assert_eq!(
            diff_entity_sets(&[a.clone()]).unwrap_err(),
            DiffError::InvalidVersionCount(1)
        );
        assert_eq!(
            diff_entity_sets(&[a.clone(), a.clone(), a.clone(), a]).unwrap_err(),
            DiffError::InvalidVersionCount(4)
        );
    }
}
