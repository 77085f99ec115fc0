//! Criterion microbenches for labelport schema handling and format selection.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Labeling config parsing (from_label_config_str)
//! - Schema classification (classify)
//! - Format selection (select_formats)
//! - PULC line formatting over a task export (from_records_slice, pulc_line)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use labelport::classify::classify;
use labelport::convert::pulc::pulc_line;
use labelport::convert::ConvertOptions;
use labelport::records::from_records_slice;
use labelport::schema::label_config::from_label_config_str;
use labelport::select::select_formats;

// Include test fixtures at compile time (no file I/O during benchmark)
const DETECTION_CONFIG: &str = include_str!("../tests/fixtures/object_detection.xml");
const MULTI_KEY_CONFIG: &str = include_str!("../tests/fixtures/multi_data_keys.xml");
const TASKS_FIXTURE: &str = include_str!("../tests/fixtures/tasks.json");
const CLASSIFICATION_CONFIG: &str = include_str!("../tests/fixtures/image_classification.xml");

/// Benchmark labeling config parsing.
fn bench_label_config_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("label_config_parse");

    for (name, xml) in [("detection", DETECTION_CONFIG), ("multi_key", MULTI_KEY_CONFIG)] {
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let schema = from_label_config_str(black_box(xml)).unwrap();
                black_box(schema)
            })
        });
    }

    group.finish();
}

/// Benchmark classification followed by selection.
fn bench_select_formats(c: &mut Criterion) {
    // Parse once (outside the timed region)
    let schema = from_label_config_str(DETECTION_CONFIG).expect("Failed to parse config fixture");
    let sets = classify(&schema);

    let mut group = c.benchmark_group("select");

    group.bench_function("classify", |b| {
        b.iter(|| {
            let sets = classify(black_box(&schema));
            black_box(sets)
        })
    });

    group.bench_function("select_formats", |b| {
        b.iter(|| {
            let formats = select_formats(black_box(&sets), false);
            black_box(formats)
        })
    });

    group.finish();
}

/// Benchmark task expansion and PULC line formatting.
fn bench_pulc_lines(c: &mut Criterion) {
    let schema =
        from_label_config_str(CLASSIFICATION_CONFIG).expect("Failed to parse config fixture");
    let options = ConvertOptions::default();

    let mut group = c.benchmark_group("pulc");
    group.throughput(Throughput::Bytes(TASKS_FIXTURE.len() as u64));

    group.bench_function("tasks_to_lines", |b| {
        b.iter(|| {
            let records =
                from_records_slice(black_box(TASKS_FIXTURE.as_bytes()), Some(&schema)).unwrap();
            let lines: Vec<String> = records
                .iter()
                .enumerate()
                .map(|(index, record)| pulc_line(record, index, &options).unwrap())
                .collect();
            black_box(lines)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_label_config_parse,
    bench_select_formats,
    bench_pulc_lines,
);
criterion_main!(benches);
