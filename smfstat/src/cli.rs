use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

fn parse_pct(input: &str) -> Result<f64, String> {
    let s = input.trim().trim_end_matches('%');
    let value: f64 = s
        .parse()
        .map_err(|_| format!("invalid percentage '{input}' (expected e.g. 90, 99.5)"))?;

    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(format!("percentage '{input}' is out of range (expected 0..=100)"));
    }

    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Per-thread lines plus a run summary; fails the run on errors.
    HumanReadable,
    /// Pretty-printed JSON document; anomalies are reported as warnings.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "smfstat",
    author,
    version,
    about = "Summarize distributed small-file benchmark results",
    long_about = "smfstat aggregates the per-thread results collected from every host of a small-file benchmark run.\n\nIt reports per-host and total file/record counts, throughput, IOPS and data volume, and flags runs that finished too quickly, lost threads, had thread failures, or did not process enough files.",
    after_help = "Examples:\n  smfstat report results.yaml\n  smfstat report results.json --output json\n  smfstat report results.yaml --min-pct-files 95\n\nSet RUST_LOG to override the log filter (e.g. RUST_LOG=debug)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate a results document and print the report
    #[command(
        long_about = "Load the run configuration and per-thread results from a YAML or JSON document and print a report.\n\nCLI flags override values from the document's `config` section."
    )]
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Path to the results document (.yaml, .yml or .json)
    pub results: PathBuf,

    /// Output format (otherwise `config.jsonOutputRequested` decides)
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Override the minimum percentage of requested files that must complete
    #[arg(long, value_name = "PCT", value_parser = parse_pct)]
    pub min_pct_files: Option<f64>,
}
