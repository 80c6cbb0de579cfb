//! Engine performance benchmarks.
//!
//! Measures parsing, cleaning, search and statistics across dataset sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sieve::{compute_stats, infer_schema, CleaningEngine, OperationSet, Parser, SearchFilter};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate synthetic CSV data with some empty fields and repeated rows.
fn generate_csv_data(rows: usize, cols: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut lines: Vec<String> = Vec::with_capacity(rows + 1);

    lines.push(
        (0..cols)
            .map(|i| format!("column_{}", i + 1))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in 0..rows {
        // Roughly one row in twenty repeats an earlier one
        if row > 0 && rng.gen_bool(0.05) {
            let earlier = lines[rng.gen_range(1..lines.len())].clone();
            lines.push(earlier);
            continue;
        }

        let line = (0..cols)
            .map(|col| {
                if col > 0 && rng.gen_bool(0.02) {
                    return String::new();
                }
                match col % 5 {
                    0 => format!("ID_{:06}", row),
                    1 => format!("{:.2}", row as f64 * 1.5),
                    2 => format!("2023-{:02}-{:02}", (row % 12) + 1, (row % 28) + 1),
                    3 => (if row % 2 == 0 { "true" } else { "false" }).to_string(),
                    4 => format!("Category_{}", row % 10),
                    _ => unreachable!(),
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 10);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("str", rows), &data, |b, data| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_str(data).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("file", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| black_box(Parser::new().parse_file(temp.path()).unwrap()),
            )
        });
    }

    group.finish();
}

fn bench_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");
    let ops = OperationSet::parse(&["remove-na", "remove-duplicates"]).unwrap();

    for rows in [1_000, 10_000, 50_000].iter() {
        let set = Parser::new().parse_str(&generate_csv_data(*rows, 10)).unwrap();

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &set, |b, set| {
            let engine = CleaningEngine::new();
            b.iter(|| black_box(engine.clean(&set.records, &ops)))
        });
    }

    group.finish();
}

fn bench_search_and_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_stats");
    let set = Parser::new().parse_str(&generate_csv_data(10_000, 10)).unwrap();
    let schema = infer_schema(&set).unwrap();

    group.bench_function("search_substring", |b| {
        let filter = SearchFilter::new("category_7");
        b.iter(|| black_box(filter.apply(&set.records)))
    });
    group.bench_function("search_preview", |b| {
        let filter = SearchFilter::new("");
        b.iter(|| black_box(filter.apply(&set.records)))
    });
    group.bench_function("compute_stats", |b| {
        b.iter(|| black_box(compute_stats(&set.records, &schema)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_clean, bench_search_and_stats);
criterion_main!(benches);
