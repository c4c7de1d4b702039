//! CLI argument parsing for id-splits

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the ranked report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable ranked listing (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "id-splits")]
#[command(version)]
#[command(
    about = "Time filesystem operations for every way of sharding an ID into nested directories",
    long_about = None
)]
pub struct Cli {
    /// Number of digits in the identifier
    #[arg(long = "id-size", alias = "id_size", value_name = "DIGITS", default_value = "6")]
    pub id_size: usize,

    /// Most directories created per parent at each level
    #[arg(long = "all-max", alias = "all_max", value_name = "N", default_value = "2000")]
    pub all_max: usize,

    /// Directories kept alive per level as parents for the next level
    #[arg(long = "sample-max", alias = "sample_max", value_name = "N", default_value = "3")]
    pub sample_max: usize,

    /// Time only this split, given as a JSON array (e.g. '[3,3]'); implies --id-size
    #[arg(long = "split", value_name = "JSON")]
    pub split: Option<String>,

    /// Seed for name and split shuffling (default: derived from the clock)
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Scratch directory, deleted and recreated for every split
    #[arg(long = "scratch-root", value_name = "DIR")]
    pub scratch_root: Option<PathBuf>,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also print spread statistics (stddev, min, max, percentiles) per split
    #[arg(long = "stats-extended")]
    pub stats_extended: bool,

    /// Do not draw the live progress indicator
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["id-splits"]);
        assert_eq!(cli.id_size, 6);
        assert_eq!(cli.all_max, 2000);
        assert_eq!(cli.sample_max, 3);
        assert!(cli.split.is_none());
        assert!(cli.seed.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.stats_extended);
        assert!(!cli.no_progress);
    }

    #[test]
    fn test_cli_underscore_aliases() {
        let cli = Cli::parse_from([
            "id-splits",
            "--id_size=4",
            "--all_max=50",
            "--sample_max=2",
        ]);
        assert_eq!(cli.id_size, 4);
        assert_eq!(cli.all_max, 50);
        assert_eq!(cli.sample_max, 2);
    }

    #[test]
    fn test_cli_split_override() {
        let cli = Cli::parse_from(["id-splits", "--split=[3,3]", "--seed", "7"]);
        assert_eq!(cli.split.as_deref(), Some("[3,3]"));
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from(["id-splits", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_negative_sizes() {
        assert!(Cli::try_parse_from(["id-splits", "--all-max", "-3"]).is_err());
    }
}
