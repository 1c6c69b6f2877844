//! Runtime configuration for `benchdiff`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI flags
//! 2. Environment variables (`BENCHDIFF_*`, wired through clap)
//! 3. Defaults

use crate::cli::Cli;
use crate::compare::MetricSelection;
use std::io::IsTerminal;

/// Metric token that selects the latency ratio.
pub const SCORE_NS_PER_OP: &str = "ns/op";
/// Metric token that selects the allocated-bytes ratio.
pub const SCORE_BYTES_PER_OP: &str = "B/op";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Suppress rows that are not regressions.
    pub only_degression: bool,
    /// Regression cutoff ratio.
    pub threshold: f64,
    /// Revision expression the head is compared against.
    pub base: String,
    /// Which ratios gate the regression check.
    pub compare: MetricSelection,
    /// External benchmark command.
    pub bench_cmd: String,
    /// Arguments for the benchmark command.
    pub bench_args: Vec<String>,
    /// Emit one JSON report instead of tables.
    pub json: bool,
    /// Apply ANSI styling to table cells.
    pub use_color: bool,
}

impl Config {
    /// Build the runtime configuration from parsed CLI flags.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            only_degression: cli.only_degression,
            threshold: cli.threshold,
            base: cli.base.clone(),
            compare: parse_metric_selection(&cli.compare),
            bench_cmd: cli.bench_cmd.clone(),
            bench_args: split_bench_args(&cli.bench_args),
            json: cli.json,
            use_color: !cli.no_color && std::io::stdout().is_terminal(),
        }
    }
}

/// Parse the `--compare` token list into a metric selection.
///
/// Unknown tokens are ignored, matching the permissive flag handling of the
/// benchmark tools this wraps.
#[must_use]
pub fn parse_metric_selection(tokens: &str) -> MetricSelection {
    let mut selection = MetricSelection::default();
    for token in tokens.split(',') {
        match token.trim() {
            SCORE_NS_PER_OP => selection.ns_per_op = true,
            SCORE_BYTES_PER_OP => selection.alloced_bytes_per_op = true,
            _ => {}
        }
    }
    selection
}

/// Split a `--bench-args` value into argv entries.
///
/// Splitting is plain whitespace; quoting is not interpreted.
#[must_use]
pub fn split_bench_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(String::from).collect()
}
