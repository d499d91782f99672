//! Property-based tests for curve merging.
//!
//! These tests use proptest to generate random master and child lists and
//! verify that merging maintains its invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: Merging never crashes on any input
//! 2. **Determinism**: Same input always produces same output
//! 3. **Invariants**: Output is bounded by the child list and only uses master IDs
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p curvemerge --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p curvemerge --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::{Value, json};

use curvemerge::{Classification, CurveList, CurveMerger, CurveRecord, MergeRequest};

// =============================================================================
// Test Strategies
// =============================================================================

/// Curve IDs drawn from a small pool so direct and semantic matches happen often.
fn curve_id() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "DEPT", "MD", "GR", "RDEP", "RXO", "RMED", "RHOB", "NPHI", "DT", "IND", "SN18",
            "CALI", "SP", "TDEP",
        ])
        .prop_map(String::from),
        "[A-Z][A-Z0-9_]{0,7}",
    ]
}

/// Descriptions mixing rule keywords with arbitrary text.
fn description() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("deep resistivity".to_string()),
        Just("Invaded Zone resistivity".to_string()),
        Just("flushed zone (Rxo)".to_string()),
        Just("measured depth".to_string()),
        "[a-zA-Z ()]{0,40}",
    ])
}

fn curve_record() -> impl Strategy<Value = CurveRecord> {
    (
        curve_id(),
        prop::option::of("[A-Z]{1,6}"),
        prop::option::of("[A-Z/]{1,6}"),
        description(),
    )
        .prop_map(|(id, mnemonic, unit, description)| CurveRecord {
            curve_id: id,
            mnemonic,
            curve_unit: unit,
            description,
        })
}

fn curve_list(max: usize) -> impl Strategy<Value = Vec<CurveRecord>> {
    prop::collection::vec(curve_record(), 0..max)
}

/// Raw JSON entries, some of which are malformed.
fn raw_entry() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => curve_record().prop_map(|r| serde_json::to_value(r).unwrap()),
        1 => Just(json!({"Mnemonic": "NOID"})),
        1 => Just(json!({"CurveID": ""})),
        1 => any::<i64>().prop_map(|n| json!({"CurveID": n})),
        1 => "[a-z]{0,10}".prop_map(Value::String),
        1 => Just(Value::Null),
    ]
}

// =============================================================================
// Merge Invariants
// =============================================================================

proptest! {
    #[test]
    fn output_never_exceeds_child_count(
        master in curve_list(20),
        child in curve_list(30),
    ) {
        let merged = CurveMerger::new().merge(&master, &child);
        prop_assert!(merged.len() <= child.len());
    }

    #[test]
    fn output_ids_come_from_master(
        master in curve_list(20),
        child in curve_list(30),
    ) {
        let master_ids: HashSet<&str> = master.iter().map(|r| r.curve_id.as_str()).collect();
        let merged = CurveMerger::new().merge(&master, &child);

        for record in &merged {
            prop_assert!(
                master_ids.contains(record.curve_id.as_str()),
                "output CurveID {} not in master", record.curve_id
            );
        }
    }

    #[test]
    fn direct_matches_are_preserved(
        master in curve_list(20),
        child in curve_list(30),
    ) {
        let master_ids: HashSet<&str> = master.iter().map(|r| r.curve_id.as_str()).collect();
        let direct: Vec<CurveRecord> = child
            .into_iter()
            .filter(|c| master_ids.contains(c.curve_id.as_str()))
            .collect();

        let merged = CurveMerger::new().merge(&master, &direct);
        prop_assert_eq!(merged.len(), direct.len());
        for (out, child) in merged.iter().zip(&direct) {
            prop_assert_eq!(&out.curve_id, &child.curve_id);
            prop_assert_eq!(&out.mnemonic, &child.mnemonic);
            prop_assert_eq!(&out.curve_unit, &child.curve_unit);
            prop_assert_eq!(&out.description, &child.description);
        }
    }

    #[test]
    fn merge_is_deterministic(
        master in curve_list(20),
        child in curve_list(30),
    ) {
        let merger = CurveMerger::new();
        prop_assert_eq!(merger.merge(&master, &child), merger.merge(&master, &child));
    }

    #[test]
    fn output_count_matches_classifications(
        master in curve_list(20),
        child in curve_list(30),
    ) {
        let merger = CurveMerger::new();
        let request = MergeRequest::from_records(&master, &child).unwrap();

        let report = merger.merge_request(&request);
        let classified = merger.classify_request(&request);

        let matched = classified
            .classifications
            .iter()
            .filter(|c| c.classification.is_match())
            .count();
        prop_assert_eq!(report.records.len(), matched);
        prop_assert_eq!(report.summary.dropped, child.len() - matched);

        // NoMatch children never leak into output.
        let matched_positions: Vec<usize> = classified
            .classifications
            .iter()
            .filter(|c| c.classification != Classification::NoMatch)
            .map(|c| c.index)
            .collect();
        for (out, position) in report.records.iter().zip(matched_positions) {
            prop_assert_eq!(&out.mnemonic, &child[position].mnemonic);
        }
    }

    #[test]
    fn merging_output_again_is_stable(
        master in curve_list(20),
        child in curve_list(30),
    ) {
        let merger = CurveMerger::new();
        let first = merger.merge(&master, &child);

        let again: Vec<CurveRecord> = first
            .iter()
            .map(|r| CurveRecord {
                curve_id: r.curve_id.clone(),
                mnemonic: r.mnemonic.clone(),
                curve_unit: r.curve_unit.clone(),
                description: r.description.clone(),
            })
            .collect();
        prop_assert_eq!(merger.merge(&master, &again), first);
    }
}

// =============================================================================
// Malformed Input
// =============================================================================

proptest! {
    #[test]
    fn malformed_entries_never_panic(
        master in prop::collection::vec(raw_entry(), 0..20),
        child in prop::collection::vec(raw_entry(), 0..30),
    ) {
        let request = MergeRequest::new(master.clone(), child.clone());
        let report = CurveMerger::new().merge_request(&request);

        prop_assert_eq!(
            report.summary.master_valid + report.diagnostics.skipped_in(CurveList::Master).count(),
            master.len()
        );
        prop_assert_eq!(
            report.summary.child_valid + report.diagnostics.skipped_in(CurveList::Child).count(),
            child.len()
        );
        prop_assert!(report.records.len() <= report.summary.child_valid);
    }

    #[test]
    fn arbitrary_json_shape_never_panics(text in "\\PC{0,200}") {
        let _ = CurveMerger::new().merge_json(&text);
    }
}
