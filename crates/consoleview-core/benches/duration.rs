//! Benchmark tests for duration arithmetic and rendering.

use consoleview_core::{Duration, Timestamp};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_duration_new(c: &mut Criterion) {
    c.bench_function("duration_new_normalize", |b| {
        b.iter(|| Duration::new(black_box(12), black_box(-1_750_000_000)))
    });
}

fn bench_timestamp_sub(c: &mut Criterion) {
    let created = Timestamp::new(1_700_000_000, 250_000_000);
    let dropped = Timestamp::new(1_700_000_042, 125_000_000);

    c.bench_function("timestamp_sub", |b| {
        b.iter(|| black_box(dropped) - black_box(created))
    });
}

fn bench_duration_render_short(c: &mut Criterion) {
    let d = Duration::new(0, 125_000_000);

    c.bench_function("duration_render_short", |b| {
        b.iter(|| black_box(d).to_string_with_precision(2))
    });
}

fn bench_duration_render_long(c: &mut Criterion) {
    let d = Duration::new(90_061, 500);

    c.bench_function("duration_render_long", |b| {
        b.iter(|| black_box(d).to_string_with_precision(2))
    });
}

criterion_group!(
    benches,
    bench_duration_new,
    bench_timestamp_sub,
    bench_duration_render_short,
    bench_duration_render_long,
);
criterion_main!(benches);
