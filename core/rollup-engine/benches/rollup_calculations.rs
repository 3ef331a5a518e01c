//! FILENAME: core/rollup-engine/benches/rollup_calculations.rs
//! Throughput of the individual roll-ups and of the full pipeline on a
//! synthetic ledger.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ledger::{Amount, DeliveryStatus, Ledger, OrderLineRecord, OrderStatus};
use rollup_engine::{
    customer_city_count, customer_rfm, daily_order_summary, product_category_volume,
    run_pipeline, RollupDefinition,
};

const CATEGORIES: [&str; 8] = [
    "bed_bath_table",
    "health_beauty",
    "sports_leisure",
    "furniture_decor",
    "computers_accessories",
    "housewares",
    "watches_gifts",
    "toys",
];
const CITIES: [&str; 6] = [
    "sao paulo",
    "rio de janeiro",
    "belo horizonte",
    "curitiba",
    "campinas",
    "salvador",
];
const STATES: [&str; 4] = ["SP", "RJ", "MG", "PR"];

/// Deterministic ledger: ~3 lines per order, ~4 orders per customer, two
/// years of purchases.
fn synthetic_ledger(lines: usize) -> Ledger {
    let base = NaiveDate::from_ymd_opt(2016, 9, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let records = (0..lines)
        .map(|i| {
            let order = i / 3;
            let customer = order / 4;
            let ts = base + Duration::minutes((i as i64 * 97) % (730 * 24 * 60));
            let status = if i % 37 == 0 { OrderStatus::Canceled } else { OrderStatus::Delivered };
            let delivery = match i % 5 {
                0 => Some(DeliveryStatus::Late),
                4 => None,
                _ => Some(DeliveryStatus::OnTime),
            };
            let category = if i % 50 == 0 { None } else { Some(CATEGORIES[i % CATEGORIES.len()]) };

            OrderLineRecord::new(
                format!("order-{:08}", order),
                format!("customer-{:08}", customer),
                ts,
                Amount::from_cents(((i * 7919) % 50_000) as i64),
            )
            .with_product(format!("product-{}", i % 997), category)
            .with_status(status)
            .with_customer_location(
                CITIES[customer % CITIES.len()],
                STATES[customer % STATES.len()],
            )
            .with_seller_city(CITIES[i % CITIES.len()])
            .with_delivery(delivery)
        })
        .collect();

    Ledger::new(records)
}

fn bench_transforms(c: &mut Criterion) {
    let ledger = synthetic_ledger(100_000);
    let records = ledger.records();

    let mut group = c.benchmark_group("transforms");
    group.bench_function("daily_order_summary", |b| {
        b.iter(|| daily_order_summary(black_box(records)))
    });
    group.bench_function("product_category_volume", |b| {
        b.iter(|| product_category_volume(black_box(records)))
    });
    group.bench_function("customer_city_count", |b| {
        b.iter(|| customer_city_count(black_box(records)))
    });
    group.bench_function("customer_rfm", |b| b.iter(|| customer_rfm(black_box(records))));
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for &size in &[10_000usize, 100_000] {
        let ledger = synthetic_ledger(size);
        let parallel = RollupDefinition::default();
        let sequential = RollupDefinition::default().sequential();

        group.bench_with_input(BenchmarkId::new("parallel", size), &ledger, |b, ledger| {
            b.iter(|| run_pipeline(black_box(ledger), &parallel))
        });
        group.bench_with_input(BenchmarkId::new("sequential", size), &ledger, |b, ledger| {
            b.iter(|| run_pipeline(black_box(ledger), &sequential))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transforms, bench_pipeline);
criterion_main!(benches);
