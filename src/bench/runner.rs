//! Benchmark runner.
//!
//! Invokes the external benchmark command for the currently checked-out
//! revision and feeds its standard output to the parser. Does not touch
//! working-copy state; revision switching belongs to [`crate::vcs::switch`].

use super::parse::{self, RecordSet};
use crate::error::{BenchDiffError, Result};
use std::process::Command;
use tracing::{debug, warn};

/// Trailing stderr phrase with which the benchmark tool signals an
/// intentionally empty benchmark set. The string match lives here and only
/// here; everything downstream sees the typed outcome (an empty set).
const NO_BENCHMARKABLE_CODE: &str = "no packages to test";

/// Run the benchmark command and parse its output.
///
/// A non-zero exit that reports no benchmarkable code yields an empty
/// [`RecordSet`]; any other non-zero exit or spawn failure is
/// [`BenchDiffError::BenchmarkExecution`].
///
/// # Errors
///
/// Returns execution errors carrying the captured output, or
/// [`BenchDiffError::OutputParse`] when the output cannot be decoded.
pub fn run_benchmark(cmd: &str, args: &[String]) -> Result<RecordSet> {
    let command_line = render_command_line(cmd, args);
    debug!(command = %command_line, "running benchmark command");

    let output = match Command::new(cmd).args(args).output() {
        Ok(output) => output,
        Err(e) => {
            return Err(BenchDiffError::BenchmarkExecution {
                command: command_line,
                status: None,
                stdout: String::new(),
                stderr: String::new(),
                source: Some(e),
            });
        }
    };

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if is_empty_benchmark_set(&stderr) {
            debug!("benchmark command found no benchmarkable code");
            return Ok(RecordSet::default());
        }
        warn!(stdout = %stdout, stderr = %stderr, "benchmark command failed");
        return Err(BenchDiffError::BenchmarkExecution {
            command: command_line,
            status: Some(output.status),
            stdout,
            stderr,
            source: None,
        });
    }

    parse::parse(&output.stdout)
}

/// Run the benchmark command for the base revision.
///
/// A command that ran and exited non-zero is downgraded to "no prior
/// baseline" (empty set, warning). Spawn failures and parse failures stay
/// fatal.
///
/// # Errors
///
/// Same as [`run_benchmark`], minus the downgraded case.
pub fn run_baseline_benchmark(cmd: &str, args: &[String]) -> Result<RecordSet> {
    match run_benchmark(cmd, args) {
        Err(e) if e.is_nonzero_exit() => {
            warn!(error = %e, "baseline benchmark failed; comparing without a baseline");
            Ok(RecordSet::default())
        }
        other => other,
    }
}

fn is_empty_benchmark_set(stderr: &str) -> bool {
    stderr.trim().ends_with(NO_BENCHMARKABLE_CODE)
}

fn render_command_line(cmd: &str, args: &[String]) -> String {
    let mut line = cmd.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
