//! Error types and handling for `benchdiff`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration via the `Other` variant
//! - Every fatal variant names the phase that failed (resolution, reset,
//!   execution, parsing) and carries the underlying cause
//! - `Regression` is not an infrastructure fault: it is produced at the very
//!   end of a successful run, after the comparison tables have been printed

use std::process::ExitStatus;
use thiserror::Error;

/// Primary error type for `benchdiff` operations.
#[derive(Error, Debug)]
pub enum BenchDiffError {
    // === Working-copy preconditions ===
    /// The working copy has uncommitted modifications.
    #[error("the repository is dirty: commit or stash all changes first")]
    DirtyWorkingCopy,

    // === Revision control ===
    /// A revision expression could not be resolved to a commit.
    #[error("unable to resolve revision '{expr}': {detail}")]
    RevisionResolution { expr: String, detail: String },

    /// A hard reset of the working copy failed.
    #[error("failed to reset the working copy to {revision}: {detail}")]
    Reset { revision: String, detail: String },

    /// A git invocation could not be started or produced unusable output.
    #[error("git {subcommand} failed: {detail}")]
    Git { subcommand: String, detail: String },

    // === Benchmark execution ===
    /// The external benchmark command failed.
    #[error("failed to run '{command}'{}", exit_suffix(.status))]
    BenchmarkExecution {
        /// Full command line, for diagnostics.
        command: String,
        /// Exit status when the process ran; `None` when it never started.
        status: Option<ExitStatus>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Benchmark output could not be understood.
    #[error("failed to parse benchmark output: {reason}")]
    OutputParse { reason: String },

    // === Outcome ===
    /// The run succeeded but at least one benchmark got worse than the
    /// configured threshold.
    #[error("this commit makes benchmarks worse")]
    Regression,

    // === Ambient ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn exit_suffix(status: &Option<ExitStatus>) -> String {
    match status {
        Some(s) => format!(": {s}"),
        None => String::new(),
    }
}

impl BenchDiffError {
    /// True when the benchmark command started but exited unsuccessfully.
    ///
    /// Baseline runs downgrade exactly this case to "no prior baseline";
    /// spawn failures and parse failures stay fatal.
    #[must_use]
    pub const fn is_nonzero_exit(&self) -> bool {
        matches!(self, Self::BenchmarkExecution { status: Some(_), .. })
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::DirtyWorkingCopy => Some("Commit or stash your changes, then re-run"),
            Self::RevisionResolution { .. } => {
                Some("Check the --base expression against 'git rev-parse'")
            }
            Self::Regression => Some("Raise --threshold or fix the regression"),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        // One code for everything: infrastructure failures and detected
        // regressions are both process failure.
        1
    }
}

/// Result type using `BenchDiffError`.
pub type Result<T> = std::result::Result<T, BenchDiffError>;
