use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nimbus::{exceedance_probability, merge_series, HistoricalSeries, YearSample};

fn series(offset: f64) -> HistoricalSeries {
    HistoricalSeries::new(
        (1985..2025)
            .map(|year| YearSample {
                year,
                date: NaiveDate::from_ymd_opt(year, 7, 15).unwrap(),
                value: offset + (year % 17) as f64,
            })
            .collect(),
    )
}

fn bench_probability(c: &mut Criterion) {
    let temperature = series(20.0);
    let rain = series(0.0);
    c.bench_function("exceedance_probability", |b| {
        b.iter(|| exceedance_probability(black_box(&temperature), black_box(30.0)))
    });
    c.bench_function("merge_series", |b| {
        b.iter(|| merge_series(black_box(&[("temperature", &temperature), ("rain", &rain)])))
    });
}

criterion_group!(benches, bench_probability);
criterion_main!(benches);
