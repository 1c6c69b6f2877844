//! Report rendering.
//!
//! Two tabular sections on stdout: "Result" (raw measurements per revision)
//! and "Comparison" (relative deltas, emphasized by direction). The
//! `--json` mode replaces both with one machine-readable document.

mod table;

use crate::bench::{BenchmarkRecord, RecordSet};
use crate::compare::{Comparison, MetricSelection, normalize_display_ratio};
use crate::vcs::RevisionId;
use serde::Serialize;
use std::io;
use table::{Cell, CellStyle, Table};

/// Label for the working-head revision in the Result section.
pub const HEAD_LABEL: &str = "HEAD";

/// Render the raw measurements of both revisions.
///
/// One row per revision per benchmark, head first; a benchmark missing from
/// the base gets a placeholder row.
///
/// # Errors
///
/// Returns an error when the writer fails.
pub fn render_measurements<W: io::Write>(
    w: &mut W,
    head: &RecordSet,
    base: &RecordSet,
    base_label: &str,
    use_color: bool,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Result")?;
    writeln!(w, "======")?;
    writeln!(w)?;

    let mut table = Table::new(&["Name", "Commit", "NsPerOp", "AllocedBytesPerOp"]);
    for name in head.names() {
        let Some(head_rec) = head.first(name) else {
            continue;
        };
        table.add_row(measurement_row(HEAD_LABEL, head_rec));
        match base.first(name) {
            Some(base_rec) => table.add_row(measurement_row(base_label, base_rec)),
            None => table.add_row(vec![
                Cell::plain(name),
                Cell::plain(base_label),
                Cell::plain("-"),
                Cell::plain("-"),
            ]),
        }
    }
    write!(w, "{}", table.render(use_color))
}

fn measurement_row(label: &str, record: &BenchmarkRecord) -> Vec<Cell> {
    let bytes = record
        .alloced_bytes_per_op
        .map_or_else(|| "-".to_string(), |b| format!("{b} B/op"));
    vec![
        Cell::plain(&record.name),
        Cell::plain(label),
        Cell::plain(format!("{:.2} ns/op", record.ns_per_op)),
        Cell::plain(bytes),
    ]
}

/// Render the ratio table.
///
/// Rows that are not degressions are suppressed under `only_degression`;
/// unselected metrics render as `-`; the section is omitted entirely when
/// no rows remain.
///
/// # Errors
///
/// Returns an error when the writer fails.
pub fn render_comparison<W: io::Write>(
    w: &mut W,
    comparison: &Comparison,
    selection: MetricSelection,
    threshold: f64,
    only_degression: bool,
    use_color: bool,
) -> io::Result<()> {
    let mut table = Table::new(&["Name", "NsPerOp", "AllocedBytesPerOp"]);
    for row in &comparison.rows {
        if only_degression && !row.is_degression(selection, threshold) {
            continue;
        }
        let ns_cell = if selection.ns_per_op {
            ratio_cell(row.ratio_ns_per_op)
        } else {
            Cell::plain("-")
        };
        let bytes_cell = if selection.alloced_bytes_per_op {
            ratio_cell(row.ratio_alloced_bytes_per_op)
        } else {
            Cell::plain("-")
        };
        table.add_row(vec![Cell::plain(&row.name), ns_cell, bytes_cell]);
    }

    if table.is_empty() {
        return Ok(());
    }

    writeln!(w)?;
    writeln!(w, "Comparison")?;
    writeln!(w, "==========")?;
    writeln!(w)?;
    write!(w, "{}", table.render(use_color))?;
    writeln!(w)
}

/// Format a ratio for display: `abs(ratio) * 100` to two decimal places.
///
/// The sign is carried by color in the table; sub-noise ratios normalize to
/// `0.00%`.
#[must_use]
pub fn format_ratio(ratio: f64) -> String {
    let normalized = normalize_display_ratio(ratio);
    format!("{:.2}%", 100.0 * normalized.abs())
}

// Emphasis follows the raw ratio: any increase reads as worse, everything
// else as better.
fn ratio_cell(ratio: f64) -> Cell {
    let style = if ratio > 0.0 {
        CellStyle::Worse
    } else {
        CellStyle::Better
    };
    Cell::styled(format_ratio(ratio), style)
}

/// Machine-readable report for `--json` mode.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub head: &'a RevisionId,
    pub base: JsonBaseRef<'a>,
    pub threshold: f64,
    pub compare: MetricSelection,
    pub benchmarks: Vec<JsonBenchmark<'a>>,
    pub no_counterpart: &'a [String],
    pub regression: bool,
}

/// Base revision as requested and as resolved.
#[derive(Debug, Serialize)]
pub struct JsonBaseRef<'a> {
    pub expr: &'a str,
    pub revision: &'a RevisionId,
}

/// One benchmark in the JSON report.
#[derive(Debug, Serialize)]
pub struct JsonBenchmark<'a> {
    pub name: &'a str,
    pub head: &'a BenchmarkRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<&'a BenchmarkRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio_ns_per_op: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio_alloced_bytes_per_op: Option<f64>,
    pub degression: bool,
}

/// Assemble and write the JSON report.
///
/// # Errors
///
/// Returns an error when serialization or the writer fails.
#[allow(clippy::too_many_arguments)]
pub fn render_json<W: io::Write>(
    w: &mut W,
    head_id: &RevisionId,
    base_expr: &str,
    base_id: &RevisionId,
    head: &RecordSet,
    base: &RecordSet,
    comparison: &Comparison,
    selection: MetricSelection,
    threshold: f64,
) -> crate::error::Result<()> {
    let mut benchmarks = Vec::new();
    for name in head.names() {
        let Some(head_rec) = head.first(name) else {
            continue;
        };
        let row = comparison.rows.iter().find(|r| r.name == name);
        benchmarks.push(JsonBenchmark {
            name,
            head: head_rec,
            base: base.first(name),
            ratio_ns_per_op: row.map(|r| normalize_display_ratio(r.ratio_ns_per_op)),
            ratio_alloced_bytes_per_op: row
                .map(|r| normalize_display_ratio(r.ratio_alloced_bytes_per_op)),
            degression: row.is_some_and(|r| r.is_degression(selection, threshold)),
        });
    }

    let report = JsonReport {
        head: head_id,
        base: JsonBaseRef {
            expr: base_expr,
            revision: base_id,
        },
        threshold,
        compare: selection,
        benchmarks,
        no_counterpart: &comparison.no_counterpart,
        regression: comparison.regression,
    };

    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::parse;
    use crate::compare;

    fn set(text: &str) -> RecordSet {
        parse::parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn ratio_formatting_discards_sign_and_normalizes_noise() {
        assert_eq!(format_ratio(0.01), "1.00%");
        assert_eq!(format_ratio(-0.56789), "56.79%");
        assert_eq!(format_ratio(0.00001), "0.00%");
        assert_eq!(format_ratio(0.0), "0.00%");
        assert_eq!(format_ratio(0.5), "50.00%");
    }

    #[test]
    fn measurements_section_lists_head_then_base() {
        let head = set("BenchmarkA 1000 123.4 ns/op 45 B/op\n");
        let base = set("BenchmarkA 1000 100 ns/op 40 B/op\n");
        let mut out = Vec::new();
        render_measurements(&mut out, &head, &base, "HEAD~1", false).unwrap();

        let expected = "
Result
======

+------------+--------+--------------+-------------------+
|    Name    | Commit |   NsPerOp    | AllocedBytesPerOp |
+------------+--------+--------------+-------------------+
| BenchmarkA |  HEAD  | 123.40 ns/op |      45 B/op      |
+------------+--------+--------------+-------------------+
| BenchmarkA | HEAD~1 | 100.00 ns/op |      40 B/op      |
+------------+--------+--------------+-------------------+
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn missing_base_rows_render_placeholders() {
        let head = set("BenchmarkNew 1000 5 ns/op\n");
        let base = RecordSet::default();
        let mut out = Vec::new();
        render_measurements(&mut out, &head, &base, "HEAD~1", false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("| BenchmarkNew | HEAD~1 |     -      |         -         |"));
    }

    #[test]
    fn comparison_section_renders_ratio_rows() {
        let base = set("BenchmarkA 1000 100 ns/op 40 B/op\n");
        let head = set("BenchmarkA 1000 101 ns/op 60 B/op\n");
        let cmp = compare::compare(&base, &head, MetricSelection::both(), 0.2);
        let mut out = Vec::new();
        render_comparison(&mut out, &cmp, MetricSelection::both(), 0.2, false, false).unwrap();

        let expected = "
Comparison
==========

+------------+---------+-------------------+
|    Name    | NsPerOp | AllocedBytesPerOp |
+------------+---------+-------------------+
| BenchmarkA |  1.00%  |      50.00%       |
+------------+---------+-------------------+

";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn unselected_metric_renders_dash() {
        let base = set("BenchmarkA 1000 100 ns/op 40 B/op\n");
        let head = set("BenchmarkA 1000 150 ns/op 60 B/op\n");
        let latency_only = MetricSelection {
            ns_per_op: true,
            alloced_bytes_per_op: false,
        };
        let cmp = compare::compare(&base, &head, latency_only, 0.2);
        let mut out = Vec::new();
        render_comparison(&mut out, &cmp, latency_only, 0.2, false, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("| BenchmarkA | 50.00%  |         -         |"));
    }

    #[test]
    fn only_degression_suppresses_improving_rows() {
        let base = set("BenchmarkBetter 1000 100 ns/op\nBenchmarkWorse 1000 100 ns/op\n");
        let head = set("BenchmarkBetter 1000 90 ns/op\nBenchmarkWorse 1000 130 ns/op\n");
        let cmp = compare::compare(&base, &head, MetricSelection::both(), 0.2);
        assert!(cmp.regression);

        let mut out = Vec::new();
        render_comparison(&mut out, &cmp, MetricSelection::both(), 0.2, true, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("BenchmarkWorse"));
        assert!(!text.contains("BenchmarkBetter"));
    }

    #[test]
    fn comparison_section_is_omitted_when_nothing_to_show() {
        let base = RecordSet::default();
        let head = set("BenchmarkOnlyHead 1000 10 ns/op\n");
        let cmp = compare::compare(&base, &head, MetricSelection::both(), 0.2);
        let mut out = Vec::new();
        render_comparison(&mut out, &cmp, MetricSelection::both(), 0.2, false, false).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn json_report_includes_ratios_and_counterparts() {
        let base = set("BenchmarkA 1000 100 ns/op\n");
        let head = set("BenchmarkA 1000 150 ns/op\nBenchmarkNew 1000 5 ns/op\n");
        let cmp = compare::compare(&base, &head, MetricSelection::both(), 0.2);
        let head_id = RevisionId::new("bbbb");
        let base_id = RevisionId::new("aaaa");

        let mut out = Vec::new();
        render_json(
            &mut out,
            &head_id,
            "HEAD~1",
            &base_id,
            &head,
            &base,
            &cmp,
            MetricSelection::both(),
            0.2,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["head"], "bbbb");
        assert_eq!(value["base"]["expr"], "HEAD~1");
        assert_eq!(value["regression"], true);
        assert_eq!(value["no_counterpart"][0], "BenchmarkNew");
        let benchmarks = value["benchmarks"].as_array().unwrap();
        assert_eq!(benchmarks.len(), 2);
        assert!((benchmarks[0]["ratio_ns_per_op"].as_f64().unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(benchmarks[0]["degression"], true);
        assert!(benchmarks[1].get("ratio_ns_per_op").is_none());
    }
}
