//! Benchmarks for the csvchart pipeline
//!
//! Run with: cargo bench

use csvchart::chart::{ChartModel, ChartSize};
use csvchart::{Config, CsvParser, RowDecoder, SeriesSet, TableModel};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_test_csv(rows: usize, categories: usize) -> String {
    let mut csv = String::from("Date,Project Slug,Total Errors\n");
    for i in 0..rows {
        let day = i / categories;
        csv.push_str(&format!(
            "2024-{:02}-{:02},project-{},{}\n",
            (day / 28) % 12 + 1,
            day % 28 + 1,
            i % categories,
            (i * 7) % 100
        ));
    }
    csv
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [100, 1000, 10000] {
        let csv = create_test_csv(size, 10);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("parse_{}", size), |b| {
            b.iter(|| CsvParser::new().parse_str(black_box(&csv)).unwrap())
        });
    }

    group.finish();
}

fn bench_decode_and_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_group");
    let decoder = RowDecoder::new(Config::default().columns);

    for size in [100, 1000, 10000] {
        let parsed = CsvParser::new().parse_str(&create_test_csv(size, 25)).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("decode_group_{}", size), |b| {
            b.iter(|| {
                let rows = decoder.decode_all(black_box(&parsed.records));
                SeriesSet::from_rows(&rows)
            })
        });
    }

    group.finish();
}

fn bench_render_models(c: &mut Criterion) {
    let config = Config::default();
    let parsed = CsvParser::new().parse_str(&create_test_csv(5000, 50)).unwrap();
    let rows = RowDecoder::new(config.columns.clone()).decode_all(&parsed.records);
    let series = SeriesSet::from_rows(&rows);
    let size = ChartSize::for_viewport(1920.0, &config.chart);

    c.bench_function("table_model_5000", |b| {
        b.iter(|| TableModel::from_decoded(&config.table.labels, black_box(&rows)))
    });

    c.bench_function("chart_model_5000", |b| {
        b.iter(|| ChartModel::build(black_box(&series), size, None))
    });
}

criterion_group!(benches, bench_parse, bench_decode_and_group, bench_render_models);
criterion_main!(benches);
