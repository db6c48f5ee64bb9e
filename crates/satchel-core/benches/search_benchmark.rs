use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use satchel_core::{searchable, ObjectTextSearcher, Query, TablePrinter};

struct Line {
    sku: String,
    quantity: Decimal,
}

struct Order {
    number: u32,
    customer: String,
    placed: NaiveDate,
    lines: Vec<Line>,
}

searchable!(Line { sku, quantity });
searchable!(Order { number, customer, placed, lines });

fn orders(count: u32) -> Vec<Order> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|n| Order {
            number: n,
            customer: format!("customer-{}", n % 97),
            placed: start + chrono::Duration::days(i64::from(n % 365)),
            lines: (0..5)
                .map(|l| Line {
                    sku: format!("SKU-{:05}", n * 5 + l),
                    quantity: Decimal::new(i64::from(l * 125), 2),
                })
                .collect(),
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let searcher = ObjectTextSearcher::default();

    for size in [100u32, 1_000, 10_000] {
        let items = orders(size);

        group.bench_with_input(BenchmarkId::new("top_level_term", size), &items, |b, items| {
            b.iter(|| black_box(searcher.find_matches(items, "customer-42").count()));
        });

        group.bench_with_input(BenchmarkId::new("nested_term", size), &items, |b, items| {
            b.iter(|| black_box(searcher.find_matches(items, "sku-00123").count()));
        });

        group.bench_with_input(BenchmarkId::new("negated_miss", size), &items, |b, items| {
            b.iter(|| black_box(searcher.find_matches(items, "-zzz 03/").count()));
        });
    }

    group.finish();
}

fn bench_query_parse(c: &mut Criterion) {
    c.bench_function("query_parse", |b| {
        b.iter(|| black_box(Query::parse("alpha -beta gamma  delta -epsilon")));
    });
}

fn bench_table(c: &mut Criterion) {
    let items = orders(1_000);
    let printer = TablePrinter::new().sample(200);
    c.bench_function("table_render", |b| {
        b.iter(|| black_box(printer.render(&items).unwrap()));
    });
}

criterion_group!(benches, bench_search, bench_query_parse, bench_table);
criterion_main!(benches);
