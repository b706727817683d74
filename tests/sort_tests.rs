//! Sort comparator tests: determinism, reversal and the identifier tiebreak.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

mod common;

use common::{inventory_grid, inventory_rows};
use gridcore::sort::{compare_rows, sort_rows, sorted_order};
use gridcore::{
    dataset_from_rows, CellValue, Dataset, Row, SortDescriptor, SortDirection, SortStack,
};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

fn arb_value() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Null),
        (-1000i32..1000).prop_map(CellValue::from),
        "[a-dA-D]{0,3}".prop_map(CellValue::from),
        any::<bool>().prop_map(CellValue::from),
    ]
}

fn arb_rows() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((arb_value(), arb_value()), 0..60).prop_map(|cells| {
        dataset_from_rows(
            cells
                .into_iter()
                .enumerate()
                .map(|(i, (a, b))| Row::new().with("id", format!("r{i:03}")).with("a", a).with("b", b))
                .collect(),
        )
    })
}

fn ids(rows: &Dataset) -> Vec<String> {
    rows.iter().map(|r| r.get("id").to_display_string()).collect()
}

proptest! {
    #[test]
    fn prop_sort_is_deterministic(rows in arb_rows()) {
        let stack = SortStack::from(vec![SortDescriptor::asc("a"), SortDescriptor::desc("b")]);
        let once = sorted_order(&rows, &stack, "id");

        // Same input in a different source order yields the same sequence of rows
        let reversed: Dataset = rows.iter().rev().map(Arc::clone).collect();
        prop_assert_eq!(ids(&sort_rows(&rows, &stack, "id")), ids(&sort_rows(&reversed, &stack, "id")));
        prop_assert_eq!(once, sorted_order(&rows, &stack, "id"));
    }

    #[test]
    fn prop_sorted_rows_are_ordered(rows in arb_rows()) {
        let stack = SortStack::from(vec![SortDescriptor::desc("b"), SortDescriptor::asc("a")]);
        let sorted = sort_rows(&rows, &stack, "id");
        for pair in sorted.windows(2) {
            prop_assert_ne!(compare_rows(&pair[0], &pair[1], &stack, "id"), Ordering::Greater);
        }
    }

    #[test]
    fn prop_descending_reverses_ascending_with_unique_keys(values in prop::collection::hash_set(-10_000i32..10_000, 0..80)) {
        let rows = dataset_from_rows(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Row::new().with("id", format!("r{i}")).with("n", *v))
                .collect(),
        );
        let mut asc = sorted_order(&rows, &SortStack::from(vec![SortDescriptor::asc("n")]), "id");
        let desc = sorted_order(&rows, &SortStack::from(vec![SortDescriptor::desc("n")]), "id");
        asc.reverse();
        prop_assert_eq!(asc, desc);
    }
}

#[test]
fn test_ties_fall_back_to_identifier() {
    let rows = dataset_from_rows(vec![
        Row::new().with("id", "c").with("team", "red"),
        Row::new().with("id", "a").with("team", "red"),
        Row::new().with("id", "b").with("team", "blue"),
    ]);
    let stack = SortStack::from(vec![SortDescriptor::desc("team")]);
    assert_eq!(ids(&sort_rows(&rows, &stack, "id")), vec!["a", "c", "b"]);
}

#[test]
fn test_custom_identifier_column() {
    let rows = dataset_from_rows(vec![
        Row::new().with("key", 2).with("v", 1),
        Row::new().with("key", 10).with("v", 1),
        Row::new().with("key", 1).with("v", 1),
    ]);
    let stack = SortStack::from(vec![SortDescriptor::asc("v")]);
    let keys: Vec<CellValue> = sort_rows(&rows, &stack, "key")
        .iter()
        .map(|r| r.get("key").clone())
        .collect();
    // identifiers compare as strings
    assert_eq!(
        keys,
        vec![CellValue::from(1), CellValue::from(10), CellValue::from(2)]
    );
}

#[test]
fn test_nulls_first_ascending_last_descending() {
    let rows = dataset_from_rows(vec![
        Row::new().with("id", "x").with("n", 3),
        Row::new().with("id", "y"),
        Row::new().with("id", "z").with("n", 1),
    ]);
    let asc = sort_rows(&rows, &SortStack::from(vec![SortDescriptor::asc("n")]), "id");
    assert_eq!(ids(&asc), vec!["y", "z", "x"]);
    let desc = sort_rows(&rows, &SortStack::from(vec![SortDescriptor::desc("n")]), "id");
    assert_eq!(ids(&desc), vec!["x", "z", "y"]);
}

#[test]
fn test_header_clicks_cycle_through_directions() {
    let mut grid = inventory_grid(20);
    grid.toggle_sort("qty", false);
    assert_eq!(grid.sort_stack().direction("qty"), SortDirection::Asc);
    grid.toggle_sort("name", true);
    assert_eq!(grid.sort_stack().priority("name"), Some(1));

    let rows = grid.sorted_rows();
    for pair in rows.windows(2) {
        let a = pair[0].get("qty").as_number().unwrap();
        let b = pair[1].get("qty").as_number().unwrap();
        assert!(a <= b);
    }

    grid.toggle_sort("qty", false);
    assert_eq!(grid.sort_stack().descriptors(), &[SortDescriptor::desc("qty")]);
    grid.toggle_sort("qty", false);
    assert!(grid.sort_stack().is_empty());
    assert_eq!(grid.row_order(), (0..20).collect::<Vec<_>>());
}

#[test]
fn test_sorting_leaves_source_rows_shared() {
    let rows = inventory_rows(100);
    let sorted = sort_rows(&rows, &SortStack::from(vec![SortDescriptor::asc("name")]), "id");
    assert_eq!(sorted.len(), rows.len());
    assert!(sorted
        .iter()
        .all(|row| rows.iter().any(|source| Arc::ptr_eq(source, row))));
    assert_eq!(rows[0].get("id"), &CellValue::from("sku-00000"));
}
