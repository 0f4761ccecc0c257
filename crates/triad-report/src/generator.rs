//! Report emission.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use triad_diff::diff_entity_sets;
use triad_types::AnalysisResult;

use crate::contract::ComparisonDocument;
use crate::error::ReportResult;
use crate::markdown::render_main_report;
use crate::summary::render_summary;

/// Default report directory when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "triad_reports";

/// Writes one analysis run's reports into a dedicated directory.
///
/// The directory is cleared before each run: reports from a previous
/// comparison must never be mistaken for the current one.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

/// Inventory of the files one generation pass produced.
#[derive(Clone, Debug)]
pub struct ReportPaths {
    pub output_dir: PathBuf,
    pub main_report: PathBuf,
    pub three_way: PathBuf,
    pub pairwise: Vec<PathBuf>,
    pub summary: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render and write every report for `result`.
    pub fn generate(&self, result: &AnalysisResult) -> ReportResult<ReportPaths> {
        self.clean_output_dir();
        fs::create_dir_all(&self.output_dir)?;

        let now = Local::now();
        let timestamp = now.format("%Y%m%d_%H%M%S").to_string();
        let generated = now.to_rfc3339();

        let main_report = self.output_dir.join(format!("position_diff_report_{timestamp}.md"));
        fs::write(&main_report, render_main_report(result, &generated))?;

        let three_way = self
            .output_dir
            .join(format!("three_way_comparison_{timestamp}.json"));
        let document = ComparisonDocument::new(generated.clone(), &result.hashes, &result.differences);
        fs::write(&three_way, serde_json::to_string_pretty(&document)?)?;

        let (pairwise, pairwise_counts) = self.generate_pairwise(result, &timestamp, &generated)?;

        let summary = self.output_dir.join(format!("summary_{timestamp}.txt"));
        fs::write(&summary, render_summary(result, &pairwise_counts, &generated))?;

        info!(
            dir = %self.output_dir.display(),
            files = 3 + pairwise.len(),
            "reports generated"
        );
        Ok(ReportPaths {
            output_dir: self.output_dir.clone(),
            main_report,
            three_way,
            pairwise,
            summary,
        })
    }

    /// Re-diff each unordered version pair and write its contract file.
    fn generate_pairwise(
        &self,
        result: &AnalysisResult,
        timestamp: &str,
        generated: &str,
    ) -> ReportResult<(Vec<PathBuf>, Vec<(String, usize)>)> {
        let mut paths = Vec::new();
        let mut counts = Vec::new();

        for (i, j) in version_pairs(result.version_count()) {
            let sets = [result.entity_sets[i].clone(), result.entity_sets[j].clone()];
            let differences = diff_entity_sets(&sets)?;
            let hashes = [result.hashes[i].clone(), result.hashes[j].clone()];
            let document = ComparisonDocument::new(generated.to_string(), &hashes, &differences);

            let path = self.output_dir.join(format!(
                "hash{}_vs_hash{}_comparison_{timestamp}.json",
                i + 1,
                j + 1
            ));
            fs::write(&path, serde_json::to_string_pretty(&document)?)?;

            counts.push((format!("Hash {} vs Hash {}", i + 1, j + 1), differences.len()));
            paths.push(path);
        }

        Ok((paths, counts))
    }

    /// Delete any previous report directory. Failure to delete is logged
    /// and recovered: generation proceeds into whatever state remains.
    fn clean_output_dir(&self) {
        if !Path::new(&self.output_dir).exists() {
            return;
        }
        if let Err(error) = fs::remove_dir_all(&self.output_dir) {
            warn!(
                dir = %self.output_dir.display(),
                error = %error,
                "could not clean existing report directory"
            );
        }
    }
}

/// Unordered version pairs for 2 or 3 compared versions.
fn version_pairs(version_count: usize) -> Vec<(usize, usize)> {
    if version_count == 2 {
        vec![(0, 1)]
    } else {
        vec![(0, 1), (0, 2), (1, 2)]
    }
}
