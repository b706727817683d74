//! Common test fixtures for building schemas, datasets and grids.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

use gridcore::{dataset_from_rows, Column, Dataset, GridConfig, GridState, Row, ViewportSize};
use proptest::prelude::*;

/// `[id:80 pinned, name:200, qty:100 editable, price:120 editable, note:300]`
#[must_use]
pub fn inventory_schema() -> Vec<Column> {
    vec![
        Column::new("id", 80.0).pinned(),
        Column::new("name", 200.0).editable().with_label("Name"),
        Column::new("qty", 100.0).editable().with_label("Quantity"),
        Column::new("price", 120.0).editable(),
        Column::new("note", 300.0),
    ]
}

#[must_use]
pub fn inventory_rows(count: usize) -> Dataset {
    dataset_from_rows(
        (0..count)
            .map(|i| {
                Row::new()
                    .with("id", format!("sku-{i:05}"))
                    .with("name", format!("item {}", (i * 37) % 101))
                    .with("qty", ((i * 13) % 50) as f64)
                    .with("price", 9.5 + (i % 10) as f64)
            })
            .collect(),
    )
}

/// Inventory grid with a 600x400 viewport.
#[must_use]
pub fn inventory_grid(rows: usize) -> GridState {
    let mut grid = GridState::try_new(
        GridConfig::default(),
        inventory_schema(),
        inventory_rows(rows),
    )
    .expect("fixture schema is valid");
    grid.set_viewport(ViewportSize::new(600.0, 400.0));
    grid
}

/// `count` unpinned columns of width `width`.
#[must_use]
pub fn uniform_schema(count: usize, width: f64) -> Vec<Column> {
    (0..count)
        .map(|i| Column::new(format!("c{i}"), width))
        .collect()
}

/// Schemas of 1..=max columns with positive widths and a random pinned prefix.
pub fn arb_schema(max: usize) -> impl Strategy<Value = Vec<Column>> {
    prop::collection::vec(1.0f64..500.0, 1..=max).prop_flat_map(|widths| {
        let len = widths.len();
        (Just(widths), 0..=len).prop_map(|(widths, pinned)| {
            widths
                .into_iter()
                .enumerate()
                .map(|(i, w)| {
                    let col = Column::new(format!("c{i}"), w);
                    if i < pinned {
                        col.pinned()
                    } else {
                        col
                    }
                })
                .collect()
        })
    })
}
