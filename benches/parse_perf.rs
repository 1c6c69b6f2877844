// Parser performance benchmarks.
//
// Run with: cargo bench

use benchdiff::bench::parse;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Generate benchmark-tool output with the shapes the parser sees in the
/// wild: complete lines, split name/metrics pairs, and interleaved noise.
fn generate_output(records: usize) -> String {
    let mut text = String::from("goos: linux\ngoarch: amd64\n");
    for i in 0..records {
        match i % 3 {
            0 => text.push_str(&format!(
                "BenchmarkAlloc{i}-8 {} {}.5 ns/op {} B/op\n",
                1000 + i,
                100 + i,
                16 + i % 64
            )),
            1 => text.push_str(&format!(
                "BenchmarkSplit{i}-8\n{} {}.25 ns/op\n",
                2000 + i,
                50 + i
            )),
            _ => {
                text.push_str("some incidental build output\n");
                text.push_str(&format!("BenchmarkPlain{i} {} {} ns/op\n", 500 + i, 10 + i));
            }
        }
    }
    text.push_str("PASS\nok  \texample.com/pkg\t1.234s\n");
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for records in [100usize, 1_000, 10_000] {
        let text = generate_output(records);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(records), &text, |b, text| {
            b.iter(|| parse::parse(black_box(text.as_bytes())).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
