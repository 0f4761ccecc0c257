use clap::Parser;

#[derive(Parser)]
#[command(
    name = "triad",
    about = "Triad — position-based consistency checker for content-addressed datasets",
    version,
)]
pub struct Cli {
    /// Three root hashes to compare
    pub hashes: Vec<String>,

    /// Prompt for the hashes instead of passing them positionally
    #[arg(short, long)]
    pub interactive: bool,

    /// Worker pool size for parallel fetching
    #[arg(short, long, default_value = "10")]
    pub workers: usize,

    /// Output directory for reports
    #[arg(short, long, default_value = "triad_reports")]
    pub output: String,

    /// Mirror base URL, repeatable; tried in the given order
    #[arg(long = "gateway")]
    pub gateways: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_three_hashes() {
        let cli = Cli::try_parse_from(["triad", "QmA", "QmB", "QmC"]).unwrap();
        assert_eq!(cli.hashes, vec!["QmA", "QmB", "QmC"]);
        assert!(!cli.interactive);
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["triad"]).unwrap();
        assert_eq!(cli.workers, 10);
        assert_eq!(cli.output, "triad_reports");
        assert_eq!(cli.timeout_secs, 10);
        assert!(cli.gateways.is_empty());
    }

    #[test]
    fn parse_workers_short_flag() {
        let cli = Cli::try_parse_from(["triad", "-w", "4", "QmA", "QmB", "QmC"]).unwrap();
        assert_eq!(cli.workers, 4);
    }

    #[test]
    fn parse_output_directory() {
        let cli = Cli::try_parse_from(["triad", "-o", "out", "QmA", "QmB", "QmC"]).unwrap();
        assert_eq!(cli.output, "out");
    }

    #[test]
    fn parse_repeated_gateways_keep_order() {
        let cli = Cli::try_parse_from([
            "triad",
            "--gateway",
            "https://a/ipfs/",
            "--gateway",
            "https://b/ipfs/",
            "QmA",
            "QmB",
            "QmC",
        ])
        .unwrap();
        assert_eq!(cli.gateways, vec!["https://a/ipfs/", "https://b/ipfs/"]);
    }

    #[test]
    fn parse_interactive() {
        let cli = Cli::try_parse_from(["triad", "--interactive"]).unwrap();
        assert!(cli.interactive);
        assert!(cli.hashes.is_empty());
    }

    #[test]
    fn parse_timeout() {
        let cli = Cli::try_parse_from(["triad", "--timeout-secs", "30", "QmA", "QmB", "QmC"]).unwrap();
        assert_eq!(cli.timeout_secs, 30);
    }
}
