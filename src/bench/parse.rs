//! Benchmark output parser.
//!
//! Turns the line-oriented text a benchmark tool prints into an ordered,
//! named collection of measurements. A measurement line has the shape
//!
//! ```text
//! BenchmarkFoo-8   1000000   123.4 ns/op   45 B/op
//! ```
//!
//! Under verbose or parallel output modes the tool may split the name and
//! the metrics across adjacent lines; the parser carries a pending name so
//! such benchmarks are not dropped. Anything else on the stream (build logs,
//! warnings, `PASS`/`ok` summaries) is skipped silently.

use crate::error::{BenchDiffError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Token that introduces a benchmark name.
const NAME_PREFIX: &str = "Benchmark";
/// Unit suffix for the latency metric.
const UNIT_NS_PER_OP: &str = "ns/op";
/// Unit suffix for the allocation metric.
const UNIT_BYTES_PER_OP: &str = "B/op";

/// One measured benchmark invocation.
///
/// Created exclusively by [`parse`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    /// Declared benchmark name, e.g. `BenchmarkFoo-8`.
    pub name: String,
    /// Iteration count reported on the measurement line.
    pub iterations: u64,
    /// Nanoseconds per operation.
    pub ns_per_op: f64,
    /// Bytes allocated per operation; `None` when memory profiling was not
    /// requested.
    pub alloced_bytes_per_op: Option<u64>,
    /// Order in which this record was observed in its source text.
    #[serde(skip)]
    pub ord: usize,
}

/// Mapping from benchmark name to the ordered records sharing that name.
///
/// Insertion order within a name equals ordinal order; names iterate in
/// sorted order so downstream output is deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordSet {
    records: BTreeMap<String, Vec<BenchmarkRecord>>,
}

impl RecordSet {
    fn push(&mut self, record: BenchmarkRecord) {
        self.records
            .entry(record.name.clone())
            .or_default()
            .push(record);
    }

    /// Benchmark names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// The representative (first-observed) record for a name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&BenchmarkRecord> {
        self.records.get(name).and_then(|v| v.first())
    }

    /// All records observed for a name, in ordinal order.
    #[must_use]
    pub fn records(&self, name: &str) -> &[BenchmarkRecord] {
        self.records.get(name).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct benchmark names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Line-scanner state for the split-line accommodation.
#[derive(Debug)]
enum LineState {
    /// No benchmark name seen yet; metrics-only lines are skipped.
    AwaitingName,
    /// A name line was seen; metrics-only lines attach to it.
    PendingName(String),
}

/// Parse raw benchmark-tool output into a [`RecordSet`].
///
/// Individual lines that match no known form are skipped; a stream that is
/// not valid UTF-8 is the fatal case.
///
/// # Errors
///
/// Returns [`BenchDiffError::OutputParse`] when the stream cannot be decoded.
pub fn parse(data: &[u8]) -> Result<RecordSet> {
    let text = std::str::from_utf8(data).map_err(|e| BenchDiffError::OutputParse {
        reason: format!("output is not valid UTF-8: {e}"),
    })?;

    let mut set = RecordSet::default();
    let mut state = LineState::AwaitingName;
    let mut ord = 0usize;

    for line in text.lines() {
        // Complete, self-contained measurement line.
        if let Some(record) = parse_measurement_line(line, ord) {
            set.push(record);
            ord += 1;
            continue;
        }

        // Name line; metrics follow on a later line.
        if line.starts_with(NAME_PREFIX) {
            if let Some(name) = line.split_whitespace().next() {
                state = LineState::PendingName(name.to_string());
            }
            continue;
        }

        // Metrics-only continuation of the pending name.
        if let LineState::PendingName(name) = &state {
            let synthesized = format!("{name} {line}");
            if let Some(record) = parse_measurement_line(&synthesized, ord) {
                set.push(record);
                ord += 1;
            }
        }
        // Anything else is incidental tool output.
    }

    Ok(set)
}

/// Try a line as a complete measurement: `<name> <iterations> <value> <unit> ...`.
///
/// `ns/op` is required; `B/op` is optional; other unit pairs are ignored. A
/// malformed numeric field demotes the whole line to non-matching rather
/// than failing the parse pass.
fn parse_measurement_line(line: &str, ord: usize) -> Option<BenchmarkRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 || !fields[0].starts_with(NAME_PREFIX) {
        return None;
    }

    let iterations: u64 = fields[1].parse().ok()?;

    let mut ns_per_op: Option<f64> = None;
    let mut alloced_bytes_per_op: Option<u64> = None;
    for pair in fields[2..].chunks(2) {
        let &[value, unit] = pair else {
            break;
        };
        match unit {
            UNIT_NS_PER_OP => ns_per_op = Some(value.parse().ok()?),
            UNIT_BYTES_PER_OP => alloced_bytes_per_op = Some(value.parse().ok()?),
            _ => {}
        }
    }

    Some(BenchmarkRecord {
        name: fields[0].to_string(),
        iterations,
        ns_per_op: ns_per_op?,
        alloced_bytes_per_op,
        ord,
    })
}
