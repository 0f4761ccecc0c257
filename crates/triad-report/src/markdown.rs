//! The human-readable main report.

use std::fmt::Write as _;

use serde_json::Value;

use triad_diff::render_minimal;
use triad_types::{AnalysisResult, DiffKind};

/// Render the main markdown report for one analysis run.
pub fn render_main_report(result: &AnalysisResult, generated: &str) -> String {
    let mut out = String::new();
    let versions = result.version_count();

    let _ = writeln!(out, "# Position-Based Difference Analysis Report\n");
    let _ = writeln!(out, "**Generated:** {generated}\n");

    let _ = writeln!(out, "## Hash Overview\n");
    for (i, hash) in result.hashes.iter().enumerate() {
        let _ = writeln!(out, "**Hash {}:** `{hash}`", i + 1);
        let _ = writeln!(out, "- Entities found: {}\n", result.entity_sets[i].len());
    }

    let _ = writeln!(out, "## Performance\n");
    let _ = writeln!(
        out,
        "- Link collection time: {:.2}s",
        result.timing.collect.as_secs_f64()
    );
    let _ = writeln!(
        out,
        "- Content fetching time: {:.2}s",
        result.timing.fetch.as_secs_f64()
    );
    let _ = writeln!(
        out,
        "- **Total time: {:.2}s**\n",
        result.timing.total().as_secs_f64()
    );

    let _ = writeln!(out, "## Position Comparison\n");
    let header: Vec<String> = (1..=versions).map(|i| format!("Hash {i}")).collect();
    let _ = writeln!(out, "| Pos | {} |", header.join(" | "));
    let _ = writeln!(out, "|-----|{}", "--------|".repeat(versions));
    for position in 0..result.max_positions() {
        let cells: Vec<&str> = result
            .entity_sets
            .iter()
            .map(|set| match set.get(position).and_then(Option::as_ref) {
                Some(entity) => entity.name.as_str(),
                None => "MISSING",
            })
            .collect();
        let _ = writeln!(out, "| {position:02} | {} |", cells.join(" | "));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Comparison Summary\n");
    let _ = writeln!(
        out,
        "**Total differences found:** {}\n",
        result.differences.len()
    );

    if result.differences.is_empty() {
        let _ = writeln!(
            out,
            "No differences found. All hashes have identical content at all positions.\n"
        );
        return out;
    }

    let _ = writeln!(out, "- Missing entities: {}", result.missing_count());
    let _ = writeln!(out, "- Different content: {}\n", result.different_count());

    let _ = writeln!(out, "## Detailed Differences\n");
    for (i, diff) in result.differences.iter().enumerate() {
        let _ = writeln!(
            out,
            "### {}. {} (Position {:02})\n",
            i + 1,
            diff.name,
            diff.position
        );
        let _ = writeln!(out, "**Kind:** {}\n", diff.kind);

        match diff.kind {
            DiffKind::Different => {
                let _ = writeln!(out, "**Different fields ({}):**\n", diff.field_count());
                for field_diff in &diff.field_diffs {
                    let _ = writeln!(out, "- **{}:**", field_diff.field_path);
                    for (v, value) in field_diff.values.iter().enumerate() {
                        let _ = writeln!(out, "  - Hash {}: `{}`", v + 1, format_value(value.as_ref()));
                    }
                    let _ = writeln!(out);
                }

                let _ = writeln!(out, "**Minimal JSON diff:**\n");
                for (v, document) in render_minimal(&diff.field_diffs, versions).iter().enumerate() {
                    let _ = writeln!(out, "**Hash {} content:**", v + 1);
                    let pretty = serde_json::to_string_pretty(document)
                        .unwrap_or_else(|_| document.to_string());
                    let _ = writeln!(out, "```json\n{pretty}\n```\n");
                }
            }
            DiffKind::Missing => {
                let _ = writeln!(out, "**Entities at this position:**");
                for (v, entity) in diff.entities.iter().enumerate() {
                    let label = entity.as_ref().map_or("MISSING", |e| e.name.as_str());
                    let _ = writeln!(out, "- Hash {}: {label}", v + 1);
                }
                let _ = writeln!(out);
            }
        }
    }

    out
}

fn format_value(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "absent".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triad_types::{Cid, Content, Difference, EntityLocation, FetchedEntity, FieldDiff, PhaseTiming};

    fn entity(name: &str, value: Value) -> Option<FetchedEntity> {
        let location = EntityLocation::new(name, format!("https://ipfs.io/ipfs/{name}"));
        Some(FetchedEntity::new(&location, Content::Json(value)))
    }

    fn sample() -> AnalysisResult {
        AnalysisResult {
            hashes: vec![Cid::parse("QmA").unwrap(), Cid::parse("QmB").unwrap()],
            link_sets: vec![
                vec![EntityLocation::new("address", "u1")],
                vec![EntityLocation::new("address", "u2")],
            ],
            entity_sets: vec![
                vec![entity("address", json!({"city": "Oslo"}))],
                vec![entity("address", json!({"city": "Bergen"}))],
            ],
            differences: vec![Difference {
                name: "pos_00_address".into(),
                position: 0,
                kind: DiffKind::Different,
                entities: vec![
                    entity("address", json!({"city": "Oslo"})),
                    entity("address", json!({"city": "Bergen"})),
                ],
                field_diffs: vec![FieldDiff::new(
                    "city",
                    vec![Some(json!("Oslo")), Some(json!("Bergen"))],
                )],
            }],
            timing: PhaseTiming::default(),
        }
    }

    #[test]
    fn report_contains_all_sections() {
        let report = render_main_report(&sample(), "2026-01-01T00:00:00Z");
        assert!(report.contains("# Position-Based Difference Analysis Report"));
        assert!(report.contains("## Hash Overview"));
        assert!(report.contains("## Position Comparison"));
        assert!(report.contains("## Detailed Differences"));
        assert!(report.contains("**city:**"));
        assert!(report.contains("`\"Oslo\"`"));
        assert!(report.contains("```json"));
    }

    #[test]
    fn consistent_result_reports_no_differences() {
        let mut result = sample();
        result.differences.clear();
        let report = render_main_report(&result, "2026-01-01T00:00:00Z");
        assert!(report.contains("No differences found."));
        assert!(!report.contains("## Detailed Differences"));
    }

    #[test]
    fn missing_positions_list_per_version_presence() {
        let mut result = sample();
        result.entity_sets[1].clear();
        result.differences = vec![Difference {
            name: "pos_00_address".into(),
            position: 0,
            kind: DiffKind::Missing,
            entities: vec![entity("address", json!({"city": "Oslo"})), None],
            field_diffs: vec![],
        }];
        let report = render_main_report(&result, "2026-01-01T00:00:00Z");
        assert!(report.contains("**Kind:** missing"));
        assert!(report.contains("- Hash 2: MISSING"));
    }
}
