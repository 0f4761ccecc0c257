use std::io::{self, Write as _};
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;

use triad_analyzer::Analyzer;
use triad_gateway::{GatewayConfig, HttpGateway, DEFAULT_MIRRORS};
use triad_report::{ReportGenerator, ReportPaths};
use triad_types::{AnalysisResult, Cid, DiffKind};

use crate::cli::Cli;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let hashes = resolve_hashes(&cli)?;

    let mut config = GatewayConfig::default();
    if !cli.gateways.is_empty() {
        config.mirrors = cli.gateways.clone();
    }
    config.timeout = Duration::from_secs(cli.timeout_secs);
    let url_base = config
        .mirrors
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_MIRRORS[0].to_string());

    println!(
        "Comparing {} hashes with {} workers across {} mirrors",
        hashes.len().to_string().bold(),
        cli.workers.to_string().bold(),
        config.mirrors.len().to_string().bold()
    );
    for (i, hash) in hashes.iter().enumerate() {
        println!("  Hash {}: {}", i + 1, hash.to_string().cyan());
    }

    let gateway = Arc::new(HttpGateway::new(&config)?);
    let analyzer = Analyzer::new(gateway)
        .with_workers(cli.workers)
        .with_url_base(url_base);

    let result = analyzer.analyze(hashes).await?;
    let paths = ReportGenerator::new(&cli.output).generate(&result)?;

    print_results(&result);
    print_report_paths(&paths);
    Ok(())
}

/// Resolve the three hashes from arguments or the interactive prompt.
fn resolve_hashes(cli: &Cli) -> anyhow::Result<Vec<Cid>> {
    let raw = if cli.interactive {
        prompt_hashes()?
    } else {
        cli.hashes.clone()
    };
    validate_hashes(raw)
}

fn validate_hashes(raw: Vec<String>) -> anyhow::Result<Vec<Cid>> {
    if raw.len() != 3 {
        anyhow::bail!(
            "expected exactly 3 hashes, got {} (pass them positionally or use --interactive)",
            raw.len()
        );
    }
    raw.iter().map(|h| Ok(Cid::parse(h)?)).collect()
}

fn prompt_hashes() -> anyhow::Result<Vec<String>> {
    println!("Please enter 3 hashes to compare:");
    let mut hashes = Vec::with_capacity(3);
    for i in 1..=3 {
        loop {
            print!("Hash {i}: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                println!("Please enter a valid hash.");
                continue;
            }
            hashes.push(trimmed.to_string());
            break;
        }
    }
    Ok(hashes)
}

fn print_results(result: &AnalysisResult) {
    println!(
        "\n{} Analysis complete in {:.2}s (collection {:.2}s, fetch {:.2}s)",
        "✓".green().bold(),
        result.timing.total().as_secs_f64(),
        result.timing.collect.as_secs_f64(),
        result.timing.fetch.as_secs_f64()
    );

    println!("\nPosition comparison:");
    let header: Vec<String> = (1..=result.version_count())
        .map(|i| format!("{:<25}", format!("Hash {i}")))
        .collect();
    println!("{:<4} | {}", "Pos", header.join(" | "));
    for position in 0..result.max_positions() {
        let cells: Vec<String> = result
            .entity_sets
            .iter()
            .map(|set| match set.get(position).and_then(Option::as_ref) {
                Some(entity) => format!("{:<25}", truncate(&entity.name, 25)),
                None => format!("{:<25}", "MISSING".red()),
            })
            .collect();
        println!("{position:<4} | {}", cells.join(" | "));
    }

    if result.is_consistent() {
        println!(
            "\n{} No differences found. All hashes have identical content at all positions.",
            "✓".green().bold()
        );
        return;
    }

    println!(
        "\n{} {} differences ({} missing, {} different):",
        "!".yellow().bold(),
        result.differences.len(),
        result.missing_count(),
        result.different_count()
    );
    for diff in &result.differences {
        match diff.kind {
            DiffKind::Missing => {
                println!(
                    "  {} position {:02} {} — missing in some versions",
                    "✗".red(),
                    diff.position,
                    diff.name.yellow()
                );
            }
            DiffKind::Different => {
                let fields: Vec<&str> = diff
                    .field_diffs
                    .iter()
                    .take(3)
                    .map(|fd| fd.field_path.as_str())
                    .collect();
                let more = diff.field_count().saturating_sub(3);
                let suffix = if more > 0 {
                    format!(" (+{more} more)")
                } else {
                    String::new()
                };
                println!(
                    "  {} position {:02} {} — {} field(s): {}{}",
                    "≠".yellow(),
                    diff.position,
                    diff.name.yellow(),
                    diff.field_count(),
                    fields.join(", "),
                    suffix
                );
            }
        }
    }
}

fn print_report_paths(paths: &ReportPaths) {
    println!("\nReports generated in {}:", paths.output_dir.display().to_string().bold());
    println!("  Main report: {}", file_name(&paths.main_report));
    println!("  Three-way JSON: {}", file_name(&paths.three_way));
    for path in &paths.pairwise {
        println!("  Pairwise JSON: {}", file_name(path));
    }
    println!("  Summary: {}", file_name(&paths.summary));
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn truncate(name: &str, width: usize) -> String {
    if name.len() > width {
        let end = name
            .char_indices()
            .nth(width.saturating_sub(2))
            .map_or(name.len(), |(i, _)| i);
        format!("{}..", &name[..end])
    } else {
        name.to_string()
    }
}
