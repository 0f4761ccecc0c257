//! The plain-text executive summary.

use std::fmt::Write as _;

use triad_types::AnalysisResult;

/// Truncation width for hash values in the summary header.
const HASH_PREVIEW: usize = 50;

/// Render the executive summary. `pairwise` holds each pairwise
/// comparison's label and difference count.
pub fn render_summary(
    result: &AnalysisResult,
    pairwise: &[(String, usize)],
    generated: &str,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "POSITION-BASED DIFFERENCE ANALYSIS - EXECUTIVE SUMMARY");
    let _ = writeln!(out, "{}\n", "=".repeat(70));
    let _ = writeln!(out, "Generated: {generated}\n");

    let _ = writeln!(out, "HASH INFORMATION:");
    let _ = writeln!(out, "{}", "-".repeat(20));
    for (i, hash) in result.hashes.iter().enumerate() {
        let text = hash.to_string();
        let preview = if text.len() > HASH_PREVIEW {
            format!("{}...", &text[..HASH_PREVIEW])
        } else {
            text
        };
        let _ = writeln!(out, "Hash {}: {preview}", i + 1);
        let _ = writeln!(out, "  Entities: {}", result.entity_sets[i].len());
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "PERFORMANCE:");
    let _ = writeln!(out, "{}", "-".repeat(20));
    let _ = writeln!(
        out,
        "Total processing time: {:.2} seconds\n",
        result.timing.total().as_secs_f64()
    );

    let _ = writeln!(out, "POSITION-BASED COMPARISON:");
    let _ = writeln!(out, "{}", "-".repeat(25));
    let _ = writeln!(out, "Total differences: {}", result.differences.len());
    if !result.differences.is_empty() {
        let _ = writeln!(out, "  - Missing entities: {}", result.missing_count());
        let _ = writeln!(out, "  - Different content: {}", result.different_count());
        let _ = writeln!(out, "  - Different fields: {}", result.total_field_diffs());
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "PAIRWISE COMPARISONS:");
    let _ = writeln!(out, "{}", "-".repeat(20));
    for (label, count) in pairwise {
        let _ = writeln!(out, "{label}: {count} differences");
    }
    let _ = writeln!(out);

    if result.differences.is_empty() {
        let _ = writeln!(out, "RESULT: All hashes are identical at all positions!");
        return out;
    }

    let _ = writeln!(out, "TOP DIFFERENCES BY POSITION:");
    let _ = writeln!(out, "{}", "-".repeat(30));
    for (i, diff) in result.differences.iter().take(10).enumerate() {
        let _ = writeln!(
            out,
            "{}. Position {:02}: {} ({})",
            i + 1,
            diff.position,
            diff.name,
            diff.kind
        );
        if !diff.field_diffs.is_empty() {
            let fields: Vec<&str> = diff
                .field_diffs
                .iter()
                .take(3)
                .map(|fd| fd.field_path.as_str())
                .collect();
            let _ = writeln!(out, "   Fields: {}", fields.join(", "));
        }
    }
    if result.differences.len() > 10 {
        let _ = writeln!(
            out,
            "... and {} more positions",
            result.differences.len() - 10
        );
    }

    out
}
