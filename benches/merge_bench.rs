//! Criterion benchmarks for merging pricing resources into PricedProduct

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricedash::types::{PriceHistoryEntry, PricedProduct, ProductId, ProductInfo, SuggestedPrice};
use rust_decimal::Decimal;
use std::hint::black_box;

/// `len` daily entries starting 2025-01-01
fn history(len: usize) -> Vec<PriceHistoryEntry> {
    let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..len)
        .map(|i| PriceHistoryEntry {
            date: (start + chrono::Days::new(i as u64))
                .format("%Y-%m-%d")
                .to_string(),
            price: Decimal::new(1000 + i as i64 * 7, 2),
        })
        .collect()
}

fn bench_from_parts(c: &mut Criterion) {
    let id = ProductId::new(1).unwrap();
    let mut group = c.benchmark_group("merge");

    for len in [0usize, 30, 365] {
        let entries = history(len);
        group.throughput(Throughput::Elements(len.max(1) as u64));

        group.bench_with_input(
            BenchmarkId::new("from_parts", format!("{} entries", len)),
            &entries,
            |b, entries| {
                b.iter(|| {
                    PricedProduct::from_parts(
                        id,
                        SuggestedPrice {
                            suggested_price: Decimal::new(123_456, 3),
                        },
                        ProductInfo {
                            name: "Laptop".to_string(),
                            category: "Electronics".to_string(),
                        },
                        black_box(entries),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_history_json(c: &mut Criterion) {
    let json = serde_json::to_string(&history(365)).unwrap();

    let mut group = c.benchmark_group("history_json");
    group.throughput(Throughput::Bytes(json.len() as u64));

    group.bench_function("deserialize_365", |b| {
        b.iter(|| serde_json::from_str::<Vec<PriceHistoryEntry>>(black_box(&json)));
    });

    group.finish();
}

criterion_group!(benches, bench_from_parts, bench_history_json);
criterion_main!(benches);
