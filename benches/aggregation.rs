use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use envsense::{aggregate, decode_readings, filter_readings, AggregationConfig, DateRange, Reading};

fn history(count: usize) -> Vec<Reading> {
    let start = Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let phase = i as f64 / 120.0;
            Reading::new(
                21.0 + 3.0 * phase.sin(),
                60.0 + 10.0 * phase.cos(),
                400.0 + 300.0 * phase.sin(),
                start + Duration::seconds(30 * i as i64),
            )
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let readings = history(10_000);
    let config = AggregationConfig::default();
    let range = DateRange::between(
        Utc.with_ymd_and_hms(2024, 11, 1, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap(),
    );
    let body = serde_json::to_vec(&readings).unwrap();

    c.bench_function("decode_readings", |b| {
        b.iter(|| decode_readings(black_box(&body)))
    });
    c.bench_function("filter_readings", |b| {
        b.iter(|| filter_readings(black_box(&readings), black_box(&range)))
    });
    c.bench_function("aggregate", |b| {
        b.iter(|| aggregate(black_box(&readings), black_box(&config)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
