/*!
# Search Integration Tests

Exercises the public search API over records and JSON documents.
*/

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use satchel_core::{find_matches, search, searchable, ObjectTextSearcher, SatchelConfig};
use serde_json::json;

#[derive(Debug)]
struct Product {
    name: String,
    quantity: Option<Decimal>,
}

searchable!(Product { name, quantity });

fn products() -> Vec<Product> {
    vec![
        Product { name: "A B".to_string(), quantity: Some(Decimal::new(125, 0)) },
        Product { name: "A".to_string(), quantity: None },
    ]
}

fn names<'a>(matches: impl IntoIterator<Item = &'a Product>) -> Vec<&'a str> {
    matches.into_iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_top_level_terms() {
    let items = products();
    assert_eq!(names(&find_matches(&items, "A")), vec!["A B", "A"]);
    assert!(find_matches(&items, "C").is_empty());
    assert_eq!(names(&find_matches(&items, "25")), vec!["A B"]);
    assert_eq!(names(&find_matches(&items, "A -B")), vec!["A"]);
    assert_eq!(names(&find_matches(&items, "a -ab")), vec!["A B", "A"]);
}

struct Inner {
    value: String,
}

struct Outer {
    prop1: Inner,
}

searchable!(Inner { value });
searchable!(Outer { prop1 });

#[test]
fn test_nested_records() {
    let items = vec![
        Outer { prop1: Inner { value: "A B".to_string() } },
        Outer { prop1: Inner { value: "B C".to_string() } },
    ];

    let first: Vec<_> = find_matches(&items, "a").iter().map(|o| o.prop1.value.as_str()).collect();
    assert_eq!(first, vec!["A B"]);
    assert_eq!(find_matches(&items, "b").count(), 2);
    assert!(search(&items[1], "c -a"));
}

#[test]
fn test_json_documents_with_configured_depth() {
    let documents = vec![
        json!({ "id": 1, "customer": { "name": "Ada", "address": { "city": "London" } } }),
        json!({ "id": 2, "customer": { "name": "Grace", "address": { "city": "Arlington" } } }),
        json!(null),
    ];

    let shallow: SatchelConfig = serde_json::from_value(json!({ "search": { "max_depth": 1 } })).unwrap();
    let searcher = ObjectTextSearcher::with_config(&shallow.search);
    assert_eq!(searcher.find_matches(&documents, "london").count(), 0);
    assert_eq!(searcher.find_matches(&documents, "grace").count(), 1);

    let default = ObjectTextSearcher::default();
    assert_eq!(default.find_matches(&documents, "london").count(), 1);
    assert_eq!(default.find_matches(&documents, "").count(), 3);
    assert_eq!(default.find_matches(&documents, "-london").count(), 1);
}

struct Shipment {
    reference: &'static str,
    shipped: DateTime<Utc>,
    delivered: Option<DateTime<FixedOffset>>,
    weight: f64,
}

searchable!(Shipment { reference, shipped, delivered, weight });

#[test]
fn test_datetimes_and_floats() {
    let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
    let shipments = vec![
        Shipment {
            reference: "S-1",
            shipped: Utc.with_ymd_and_hms(2024, 3, 7, 23, 15, 0).unwrap(),
            // 03/09 01:30 in UTC, still 03/08 locally
            delivered: Some(eastern.with_ymd_and_hms(2024, 3, 8, 20, 30, 0).unwrap()),
            weight: 0.000125,
        },
        Shipment {
            reference: "S-2",
            shipped: Utc.with_ymd_and_hms(2024, 11, 20, 8, 0, 0).unwrap(),
            delivered: None,
            weight: 1.5e21,
        },
    ];
    let references = |query: &str| -> Vec<&'static str> {
        find_matches(&shipments, query).iter().map(|s| s.reference).collect()
    };

    assert_eq!(references("03/07/2024"), vec!["S-1"]);
    assert_eq!(references("03/08"), vec!["S-1"]);
    assert!(references("03/09").is_empty());
    assert!(references("23:15").is_empty());
    assert_eq!(references("/2024 -11/"), vec!["S-1"]);

    // floats print in plain positional notation, never with an exponent
    assert_eq!(references("0.000125"), vec!["S-1"]);
    assert_eq!(references("1500000000000000000000"), vec!["S-2"]);
    assert!(references("e21").is_empty());
}
