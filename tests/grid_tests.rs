//! End-to-end tests: JSON in, render instructions out.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::inventory_grid;
use gridcore::{
    dataset_from_rows, CellPosition, Column, GridConfig, GridError, GridState, Region, Row,
    ScrollOffset, ViewportSize,
};

const SCHEMA_JSON: &str = r#"[
    {"id": "id", "label": "ID", "width": 80, "pinned": true},
    {"id": "name", "label": "Name", "width": 200, "editable": true, "type": "text"},
    {"id": "joined", "width": 120, "type": "date"}
]"#;

const ROWS_JSON: &str = r#"[
    {"id": "u1", "name": "Ada", "joined": {"date": 0}},
    {"id": "u2", "name": "Grace", "joined": null},
    {"id": "u3", "name": null}
]"#;

fn json_grid(config: &str) -> GridState {
    let config = GridConfig::from_json(config).unwrap();
    let schema: Vec<Column> = serde_json::from_str(SCHEMA_JSON).unwrap();
    let rows: Vec<Row> = serde_json::from_str(ROWS_JSON).unwrap();
    let mut grid = GridState::try_new(config, schema, dataset_from_rows(rows)).unwrap();
    grid.set_viewport(ViewportSize::new(300.0, 200.0));
    grid
}

#[test]
fn test_json_load_and_render() {
    let grid = json_grid(r#"{"rowHeight": 30, "headerHeight": 36}"#);
    let frame = grid.render_frame();

    assert_eq!(frame.header_height, 36.0);
    assert_eq!(frame.content_height, 90.0);
    let header_labels: Vec<String> = frame
        .cells
        .iter()
        .filter(|c| c.region == Region::Header)
        .map(|c| c.content.to_display_string())
        .collect();
    // a missing label falls back to the column id
    assert_eq!(header_labels, vec!["ID", "Name", "joined"]);

    let joined = frame
        .cells
        .iter()
        .find(|c| c.region == Region::Body && c.position == CellPosition::new(0, 2))
        .unwrap();
    assert_eq!(joined.content.to_display_string(), "1970-01-01");
    assert_eq!(joined.placement.y, 0.0);
    assert_eq!(joined.placement.x, 280.0);
}

#[test]
fn test_pinned_cells_stack_above_scrolled_cells() {
    let mut grid = json_grid("{}");
    grid.scroll_to(ScrollOffset::new(0.0, 100.0));
    let frame = grid.render_frame();

    let body_id = frame
        .cells
        .iter()
        .find(|c| c.region == Region::Body && c.column_id == "id")
        .unwrap();
    let body_name = frame
        .cells
        .iter()
        .find(|c| c.region == Region::Body && c.column_id == "name")
        .unwrap();
    let header_id = frame
        .cells
        .iter()
        .find(|c| c.region == Region::Header && c.column_id == "id")
        .unwrap();

    // Body block is translated by the container scroll; pinned cells compensate
    assert_eq!(body_id.placement.x, 100.0);
    assert_eq!(body_name.placement.x, 80.0 - 100.0);
    assert_eq!(header_id.placement.x, 0.0);
    assert!(header_id.placement.z_index > body_id.placement.z_index);
    assert!(body_id.placement.z_index > body_name.placement.z_index);
}

#[test]
fn test_invalid_config_and_schema_are_reported() {
    assert!(matches!(
        GridConfig::from_json(r#"{"rowHeight": 0}"#),
        Err(GridError::Config(_))
    ));
    assert!(matches!(
        GridConfig::from_json(r#"{"rowHeight": "tall"}"#),
        Err(GridError::Json(_))
    ));

    let schema = vec![
        Column::new("a", 10.0),
        Column::new("b", 10.0).pinned(),
    ];
    let err = GridState::try_new(GridConfig::default(), schema, Vec::new()).unwrap_err();
    assert!(matches!(err, GridError::NonContiguousPinned { index: 1, .. }));
}

#[test]
fn test_unbounded_frame_synthesizes_columns() {
    let mut grid = inventory_grid(5);
    grid.set_config(GridConfig {
        unbounded_columns: true,
        ..GridConfig::default()
    });
    grid.scroll_to(ScrollOffset::new(0.0, 2_000.0));
    let frame = grid.render_frame();

    let window = frame.window.columns;
    assert_eq!(window.start(), Some(18));
    let synthesized = frame
        .cells
        .iter()
        .find(|c| c.region == Region::Header && c.position.col == 20)
        .unwrap();
    assert_eq!(synthesized.content.to_display_string(), "U");
    assert_eq!(synthesized.placement.x, 2000.0 - 2000.0);
    // Past the schema, body cells have no data
    assert!(frame
        .cells
        .iter()
        .filter(|c| c.region == Region::Body && c.position.col >= 5)
        .all(|c| c.content.is_null()));
}

#[test]
fn test_frame_serializes_camel_case() {
    let grid = inventory_grid(3);
    let json = serde_json::to_value(grid.render_frame()).unwrap();
    assert!(json["headerHeight"].is_number());
    let first = &json["cells"][0];
    assert_eq!(first["region"], "header");
    assert_eq!(first["placement"]["zIndex"], 4);
    assert_eq!(first["columnId"], "id");
}
