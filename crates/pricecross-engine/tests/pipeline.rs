//! End-to-end tests for the category pipeline.
//!
//! Drives `run_category` / `run_comparison` with in-memory raw tables and
//! a recording `MemorySink`, covering the headline scenarios: exact-code
//! matching, empty-code fuzzy fallback, single-retailer skips, the
//! long/short output split, and determinism across reruns.

use serde_json::{json, Value};

use pricecross_core::{CompareConfig, Retailer, RetailerSet, Tier};
use pricecross_engine::pipeline::{run_category, run_comparison, CategorySource, CategoryStatus};
use pricecross_engine::similarity::MatchingBlocks;
use pricecross_engine::sink::MemorySink;
use pricecross_engine::table::RawTable;

fn retailer_set() -> RetailerSet {
    RetailerSet::new(vec![
        Retailer::new("2B"),
        Retailer::new("Btech"),
        Retailer::new("Raneen"),
    ])
    .expect("valid retailer set")
}

fn long_columns() -> Vec<String> {
    vec![
        "Item Name".to_string(),
        "New Price".to_string(),
        "Normalized Code".to_string(),
    ]
}

fn short_columns() -> Vec<String> {
    vec![
        "Item Name".to_string(),
        "New Price".to_string(),
        "Normalized Code".to_string(),
        "Product URL".to_string(),
    ]
}

fn long_table(retailer: &str, rows: Vec<Vec<Value>>) -> RawTable {
    RawTable::new(Retailer::new(retailer), long_columns(), rows)
}

fn short_table(retailer: &str, rows: Vec<Vec<Value>>) -> RawTable {
    RawTable::new(Retailer::new(retailer), short_columns(), rows)
}

fn run_long(tables: &[RawTable], sink: &mut MemorySink) -> CategoryStatus {
    run_category(
        "Appliances",
        tables,
        &retailer_set(),
        &CompareConfig::long_form(),
        &MatchingBlocks,
        sink,
    )
    .expect("pipeline should not fail with a memory sink")
}

// ---------------------------------------------------------------------------
// Exact-code matching
// ---------------------------------------------------------------------------

#[test]
fn shared_code_yields_full_confidence_and_cheapest_retailer() {
    let tables = vec![
        long_table(
            "2B",
            vec![vec![json!("Widget X1"), json!(100), json!("x1")]],
        ),
        long_table(
            "Btech",
            vec![vec![json!("Widget X1 Pro"), json!(90), json!("x1")]],
        ),
    ];
    let mut sink = MemorySink::new();
    let status = run_long(&tables, &mut sink);

    match status {
        CategoryStatus::Processed(outcome) => assert_eq!(outcome.matched, 1),
        CategoryStatus::Skipped(_) => panic!("expected processed category"),
    }

    let matched = sink
        .tables
        .iter()
        .find(|t| t.tier == Tier::Matched)
        .expect("matched table present");
    assert_eq!(matched.rows.len(), 1);
    let row = &matched.rows[0];
    // Columns: 3 per retailer (3 retailers), then Confidence / Best Price /
    // Lowest Retailer.
    assert_eq!(row[9], Value::from(100.0));
    assert_eq!(row[10], Value::String("90".to_string()));
    assert_eq!(row[11], Value::String("Btech".to_string()));
    // Raneen had no data for the group.
    assert_eq!(row[6], Value::String("N/A".to_string()));
}

#[test]
fn differing_codes_never_match_exactly() {
    let tables = vec![
        long_table("2B", vec![vec![json!("Widget A"), json!(100), json!("a1")]]),
        long_table("Btech", vec![vec![json!("Widget B"), json!(90), json!("b2")]]),
    ];
    let mut sink = MemorySink::new();
    run_long(&tables, &mut sink);
    assert!(sink.tables.iter().all(|t| t.rows.is_empty()));
}

// ---------------------------------------------------------------------------
// Empty-code fuzzy fallback
// ---------------------------------------------------------------------------

#[test]
fn empty_code_collision_is_scored_by_name_similarity() {
    let tables = vec![
        long_table(
            "2B",
            vec![vec![json!("Blender 500W"), json!(200), json!("")]],
        ),
        long_table(
            "Btech",
            vec![vec![json!("Blender 500 Watt"), json!(180), json!("")]],
        ),
    ];
    let mut sink = MemorySink::new();
    let status = run_long(&tables, &mut sink);

    match status {
        CategoryStatus::Processed(outcome) => {
            assert_eq!(outcome.matched, 0);
            assert_eq!(outcome.weak_matched, 1);
        }
        CategoryStatus::Skipped(_) => panic!("expected processed category"),
    }

    let weak = sink
        .tables
        .iter()
        .find(|t| t.tier == Tier::WeakMatched)
        .expect("weak-matched table present");
    let row = &weak.rows[0];
    // MatchingBlocks("Blender 500W", "Blender 500 Watt") = 24/28 -> 85.71.
    assert_eq!(row[9], Value::from(85.71));
    assert_eq!(row[10], Value::String("180".to_string()));
    assert_eq!(row[11], Value::String("Btech".to_string()));
}

#[test]
fn dissimilar_empty_code_names_land_in_unmatched() {
    let tables = vec![
        long_table("2B", vec![vec![json!("Blender 500W"), json!(200), json!("")]]),
        long_table("Btech", vec![vec![json!("Gaming Mouse"), json!(50), json!("")]]),
    ];
    let mut sink = MemorySink::new();
    run_long(&tables, &mut sink);

    let unmatched = sink
        .tables
        .iter()
        .find(|t| t.tier == Tier::Unmatched)
        .expect("unmatched table present");
    assert_eq!(unmatched.rows.len(), 1);
    let highlight = unmatched.highlight.as_ref().expect("highlight policy");
    assert!((highlight.below_confidence - 10.0).abs() < f64::EPSILON);
}

// ---------------------------------------------------------------------------
// Skips and summaries
// ---------------------------------------------------------------------------

#[test]
fn single_retailer_category_appears_only_in_skip_summary() {
    let sources = vec![CategorySource {
        category: "Lonely".to_string(),
        tables: vec![long_table(
            "2B",
            vec![vec![json!("Widget"), json!(10), json!("w1")]],
        )],
    }];
    let mut sink = MemorySink::new();
    let summary = run_comparison(
        &sources,
        &retailer_set(),
        &CompareConfig::long_form(),
        &MatchingBlocks,
        &mut sink,
    );

    assert!(summary.processed.is_empty());
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].category, "Lonely");
    assert_eq!(summary.skipped[0].retailers_with_data, vec!["2B".to_string()]);
    assert!(sink.tables.is_empty());
}

#[test]
fn category_with_one_bad_table_proceeds_with_the_rest() {
    // Raneen's table lacks the code column; 2B and Btech still compare.
    let bad = RawTable::new(
        Retailer::new("Raneen"),
        vec!["Item Name".to_string(), "New Price".to_string()],
        vec![vec![json!("Widget X1"), json!(80)]],
    );
    let tables = vec![
        long_table("2B", vec![vec![json!("Widget X1"), json!(100), json!("x1")]]),
        long_table("Btech", vec![vec![json!("Widget X1"), json!(90), json!("x1")]]),
        bad,
    ];
    let mut sink = MemorySink::new();
    let status = run_long(&tables, &mut sink);

    match status {
        CategoryStatus::Processed(outcome) => assert_eq!(outcome.matched, 1),
        CategoryStatus::Skipped(_) => panic!("expected processed category"),
    }
}

// ---------------------------------------------------------------------------
// Short-form output
// ---------------------------------------------------------------------------

#[test]
fn short_form_collapses_to_winner_rows_sorted_by_confidence() {
    let tables = vec![
        short_table(
            "2B",
            vec![
                vec![
                    json!("Widget X1"),
                    json!(100),
                    json!("x1"),
                    json!("https://2b.example/x1"),
                ],
                vec![
                    json!("Blender 500W"),
                    json!(200),
                    json!(""),
                    json!("https://2b.example/blender"),
                ],
            ],
        ),
        short_table(
            "Btech",
            vec![
                vec![
                    json!("Widget X1 Pro"),
                    json!(90),
                    json!("x1"),
                    json!("https://btech.example/x1"),
                ],
                vec![
                    json!("Blender 500 Watt"),
                    json!(180),
                    json!(""),
                    json!("https://btech.example/blender"),
                ],
            ],
        ),
    ];
    let mut sink = MemorySink::new();
    run_category(
        "Appliances",
        &tables,
        &retailer_set(),
        &CompareConfig::short_form(),
        &MatchingBlocks,
        &mut sink,
    )
    .expect("short-form run");

    assert_eq!(sink.tables.len(), 2);
    let matched = &sink.tables[0];
    assert_eq!(matched.rows.len(), 2);
    // Exact-code group (100.0) sorts above the fuzzy blender group (85.71).
    assert_eq!(matched.rows[0][2], Value::from(100.0));
    assert_eq!(matched.rows[1][2], Value::from(85.71));
    // Winner row carries the cheapest retailer's name and URL.
    assert_eq!(matched.rows[0][0], Value::String("Widget X1 Pro".to_string()));
    assert_eq!(
        matched.rows[0][5],
        Value::String("https://btech.example/x1".to_string())
    );
    assert_eq!(matched.rows[0][4], Value::String("Btech".to_string()));
}

#[test]
fn short_form_drops_below_minimum_groups_entirely() {
    let tables = vec![
        short_table(
            "2B",
            vec![vec![
                json!("Blender 500W"),
                json!(200),
                json!(""),
                json!("https://2b.example/b"),
            ]],
        ),
        short_table(
            "Btech",
            vec![vec![
                json!("Gaming Mouse"),
                json!(50),
                json!(""),
                json!("https://btech.example/m"),
            ]],
        ),
    ];
    let mut sink = MemorySink::new();
    run_category(
        "Mixed",
        &tables,
        &retailer_set(),
        &CompareConfig::short_form(),
        &MatchingBlocks,
        &mut sink,
    )
    .expect("short-form run");

    // Names share almost nothing, so confidence falls below the minimum
    // threshold: neither table carries the group.
    assert!(sink.tables.iter().all(|t| t.rows.is_empty()));
}

#[test]
fn short_form_requires_url_column() {
    let tables = vec![
        long_table("2B", vec![vec![json!("Widget"), json!(100), json!("x1")]]),
        long_table("Btech", vec![vec![json!("Widget"), json!(90), json!("x1")]]),
    ];
    let mut sink = MemorySink::new();
    let status = run_category(
        "Appliances",
        &tables,
        &retailer_set(),
        &CompareConfig::short_form(),
        &MatchingBlocks,
        &mut sink,
    )
    .expect("short-form run");
    // Both tables lack Product URL, so neither is usable.
    assert!(matches!(status, CategoryStatus::Skipped(_)));
}

// ---------------------------------------------------------------------------
// Policy and determinism properties
// ---------------------------------------------------------------------------

#[test]
fn max_policy_confidence_not_below_mean_policy() {
    let tables = || {
        vec![
            long_table("2B", vec![vec![json!("Blender 500W"), json!(200), json!("")]]),
            long_table(
                "Btech",
                vec![vec![json!("Blender 500 Watt"), json!(180), json!("")]],
            ),
            long_table("Raneen", vec![vec![json!("Mixer 900"), json!(150), json!("")]]),
        ]
    };

    let confidence_of = |config: CompareConfig| -> f64 {
        let mut sink = MemorySink::new();
        run_category(
            "Appliances",
            &tables(),
            &retailer_set(),
            &config,
            &MatchingBlocks,
            &mut sink,
        )
        .expect("run");
        sink.tables
            .iter()
            .flat_map(|t| &t.rows)
            .filter_map(|row| row[9].as_f64())
            .next()
            .expect("one fallback group reported")
    };

    let mut mean_config = CompareConfig::long_form();
    mean_config.aggregation = pricecross_core::AggregationPolicy::Mean;

    assert!(confidence_of(CompareConfig::long_form()) >= confidence_of(mean_config));
}

#[test]
fn rerunning_identical_inputs_is_deterministic() {
    let tables = vec![
        long_table(
            "2B",
            vec![
                vec![json!("Widget X1"), json!(100), json!("x1")],
                vec![json!("Blender 500W"), json!(200), json!("")],
                vec![json!("Kettle K2"), json!(55), json!("k2")],
            ],
        ),
        long_table(
            "Btech",
            vec![
                vec![json!("Widget X1 Pro"), json!(90), json!("x1")],
                vec![json!("Blender 500 Watt"), json!(180), json!("")],
                vec![json!("Kettle K2 Deluxe"), json!(55), json!("k2")],
            ],
        ),
    ];

    let run_once = || {
        let mut sink = MemorySink::new();
        run_long(&tables, &mut sink);
        sink.tables
            .into_iter()
            .map(|t| (t.tier, t.columns, t.rows))
            .collect::<Vec<_>>()
    };

    assert_eq!(run_once(), run_once());
}
