//! CLI definitions and entry point.

use clap::Parser;

/// Continuous benchmarking for git projects
#[derive(Parser, Debug)]
#[command(name = "benchdiff", author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Show only benchmarks with a worse score
    #[arg(long)]
    pub only_degression: bool,

    /// Fail if a benchmark gets worse than this ratio (0.2 = 20%)
    #[arg(long, default_value_t = 0.2, env = "BENCHDIFF_THRESHOLD")]
    pub threshold: f64,

    /// Base revision compared with HEAD
    #[arg(long, default_value = "HEAD~1", env = "BENCHDIFF_BASE")]
    pub base: String,

    /// Which scores gate the regression check (comma-separated: "ns/op", "B/op")
    #[arg(long, default_value = "ns/op,B/op", env = "BENCHDIFF_COMPARE")]
    pub compare: String,

    /// Command used to measure benchmarks
    #[arg(long, default_value = "go", env = "BENCHDIFF_BENCH_CMD")]
    pub bench_cmd: String,

    /// Arguments passed to the benchmark command (split on whitespace)
    #[arg(
        long,
        default_value = "test -run ^$ -bench . -benchmem ./...",
        env = "BENCHDIFF_BENCH_ARGS"
    )]
    pub bench_args: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
