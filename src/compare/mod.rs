//! Comparison and regression detection.
//!
//! Joins the base and head record sets by benchmark name, computes relative
//! deltas per metric, and classifies each row against a threshold. Only the
//! first record per name represents that benchmark; later repeated samples
//! stay available in the set but are never averaged here.

use crate::bench::{BenchmarkRecord, RecordSet};
use serde::Serialize;

/// Which ratios participate in regression classification.
///
/// Unselected ratios are still computed and displayed; they just never trip
/// the regression flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricSelection {
    /// Gate on the latency ratio.
    pub ns_per_op: bool,
    /// Gate on the allocated-bytes ratio.
    pub alloced_bytes_per_op: bool,
}

impl MetricSelection {
    /// Select both metrics.
    #[must_use]
    pub const fn both() -> Self {
        Self {
            ns_per_op: true,
            alloced_bytes_per_op: true,
        }
    }
}

/// One row of the regression report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Benchmark name.
    pub name: String,
    /// `(head - base) / base` over ns/op; `0` when the base value is `0`.
    pub ratio_ns_per_op: f64,
    /// Same formula over allocated bytes per op; absent values count as `0`.
    pub ratio_alloced_bytes_per_op: f64,
}

impl ComparisonRow {
    /// True iff any selected ratio strictly exceeds `threshold`.
    #[must_use]
    pub fn is_degression(&self, selection: MetricSelection, threshold: f64) -> bool {
        (selection.ns_per_op && self.ratio_ns_per_op > threshold)
            || (selection.alloced_bytes_per_op && self.ratio_alloced_bytes_per_op > threshold)
    }
}

/// Output of one comparison pass.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Rows for benchmarks present in both record sets.
    pub rows: Vec<ComparisonRow>,
    /// Head benchmarks with no base counterpart; never compared numerically.
    pub no_counterpart: Vec<String>,
    /// OR of the per-row classification.
    pub regression: bool,
}

/// Join two record sets and classify every shared benchmark.
///
/// The head set is authoritative for what was measured this run; its names
/// drive the iteration.
#[must_use]
pub fn compare(
    base: &RecordSet,
    head: &RecordSet,
    selection: MetricSelection,
    threshold: f64,
) -> Comparison {
    let mut rows = Vec::new();
    let mut no_counterpart = Vec::new();
    let mut regression = false;

    for name in head.names() {
        let Some(head_rec) = head.first(name) else {
            continue;
        };
        let Some(base_rec) = base.first(name) else {
            no_counterpart.push(name.to_string());
            continue;
        };

        let row = ComparisonRow {
            name: name.to_string(),
            ratio_ns_per_op: ratio(head_rec.ns_per_op, base_rec.ns_per_op),
            ratio_alloced_bytes_per_op: ratio(bytes_value(head_rec), bytes_value(base_rec)),
        };
        regression = regression || row.is_degression(selection, threshold);
        rows.push(row);
    }

    Comparison {
        rows,
        no_counterpart,
        regression,
    }
}

/// Relative delta, defined as `0` when there is no baseline signal.
///
/// A base of `0` conflates "no prior measurement" with "no change"; that
/// convention is load-bearing for the formatting and threshold behavior and
/// must not be changed here.
#[allow(clippy::float_cmp)]
fn ratio(head: f64, base: f64) -> f64 {
    if base == 0.0 { 0.0 } else { (head - base) / base }
}

fn bytes_value(record: &BenchmarkRecord) -> f64 {
    record.alloced_bytes_per_op.unwrap_or(0) as f64
}

/// Zero out sub-noise ratios before display.
///
/// Shared by every formatter so floating-point noise is never presented as
/// a change.
#[must_use]
pub fn normalize_display_ratio(ratio: f64) -> f64 {
    if ratio.abs() < 0.0001 { 0.0 } else { ratio }
}
