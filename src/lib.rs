//! benchdiff — continuous benchmarking for git projects.
//!
//! Runs the project's benchmark command twice, once at a base revision and
//! once at the working HEAD, parses both outputs into record sets, and
//! fails the run when any selected metric regresses past a threshold. The
//! working copy is switched with a guaranteed-restore protocol: whatever
//! happens, the caller's checkout ends up back on its original revision.
//!
//! Execution is strictly sequential — the working copy is process-wide
//! shared mutable state and only one revision can be checked out at a time.

pub mod bench;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod vcs;

pub use error::{BenchDiffError, Result};

use crate::bench::runner;
use crate::config::Config;
use crate::vcs::{GitCli, Vcs};
use std::io::Write;
use tracing::info;

/// Run one full compare cycle: baseline benchmark, head benchmark,
/// comparison, report.
///
/// # Errors
///
/// Propagates every infrastructure error from the taxonomy; returns
/// [`BenchDiffError::Regression`] after reporting when the comparison fails
/// the threshold.
pub fn run(config: &Config) -> Result<()> {
    let vcs = GitCli::open_current_dir()?;
    let head = vcs.head()?;
    let base = vcs.resolve(&config.base)?;

    info!(revision = %base.short(), expr = %config.base, "running benchmark at base revision");
    let base_set = vcs::with_revision(&vcs, &config.base, || {
        runner::run_baseline_benchmark(&config.bench_cmd, &config.bench_args)
    })?;

    info!(revision = %head.short(), "running benchmark at HEAD");
    let head_set = runner::run_benchmark(&config.bench_cmd, &config.bench_args)?;

    let comparison = compare::compare(&base_set, &head_set, config.compare, config.threshold);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if config.json {
        report::render_json(
            &mut out,
            &head,
            &config.base,
            &base,
            &head_set,
            &base_set,
            &comparison,
            config.compare,
            config.threshold,
        )?;
    } else {
        if !config.only_degression {
            report::render_measurements(
                &mut out,
                &head_set,
                &base_set,
                &config.base,
                config.use_color,
            )?;
        }
        report::render_comparison(
            &mut out,
            &comparison,
            config.compare,
            config.threshold,
            config.only_degression,
            config.use_color,
        )?;
    }
    out.flush()?;

    if comparison.regression {
        return Err(BenchDiffError::Regression);
    }
    Ok(())
}
