//! Edit session tests through the grid: validation, rollback, cancellation
//! and verdicts that arrive after the user has moved on.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::inventory_grid;
use futures::executor::block_on;
use gridcore::editor::{CommitRequest, FnValidator, SyncValidator, ValidationVerdict};
use gridcore::{
    CellPosition, CellValue, ColumnType, CommitOutcome, EditStatus, GridError,
    NavAction, ValidationOutcome,
};
use std::cell::Cell;

fn non_negative(value: &CellValue) -> ValidationOutcome {
    match value.as_number() {
        Some(n) if n >= 0.0 => ValidationOutcome::valid(),
        _ => ValidationOutcome::invalid("Quantity must be a non-negative number"),
    }
}

#[test]
fn test_unchanged_commit_never_invokes_validator() {
    let mut grid = inventory_grid(10);
    let calls = Cell::new(0);
    let counting = SyncValidator(|_: &CellValue| {
        calls.set(calls.get() + 1);
        ValidationOutcome::valid()
    });

    grid.open_edit(CellPosition::new(3, 2)).unwrap();
    let original = grid.cell_value(CellPosition::new(3, 2));
    let payload = block_on(grid.commit_edit(&counting)).unwrap();

    assert_eq!(calls.get(), 0);
    assert_eq!(payload.outcome, CommitOutcome::Unchanged);
    assert_eq!(payload.value, original);
    assert_eq!(grid.edit_session().unwrap().status(), EditStatus::Success);
}

#[test]
fn test_invalid_commit_rolls_back_to_original() {
    let mut grid = inventory_grid(10);
    let position = CellPosition::new(4, 2);
    let original = grid.cell_value(position);

    grid.open_edit(position).unwrap();
    grid.update_edit(CellValue::from(-3));
    let payload = block_on(grid.commit_edit(&SyncValidator(non_negative))).unwrap();

    assert_eq!(payload.value, original);
    assert_eq!(grid.cell_value(position), original);
    let session = grid.edit_session().unwrap();
    assert_eq!(session.status(), EditStatus::Error);
    assert_eq!(session.error(), Some("Quantity must be a non-negative number"));
}

#[test]
fn test_valid_commit_persists_typed_draft() {
    let mut grid = inventory_grid(10);
    let mut schema = grid.schema().to_vec();
    schema[2] = schema[2].clone().with_type(ColumnType::Number);
    grid.set_schema(schema);

    let position = CellPosition::new(1, 2);
    grid.open_edit(position).unwrap();
    assert!(grid.update_edit_text(" 17 "));
    let payload = block_on(grid.commit_edit(&SyncValidator(non_negative))).unwrap();

    assert_eq!(payload.outcome, CommitOutcome::Committed);
    assert_eq!(grid.cell_value(position), CellValue::Number(17.0));
}

#[test]
fn test_validator_failure_rolls_back() {
    let mut grid = inventory_grid(10);
    let position = CellPosition::new(0, 1);
    grid.open_edit(position).unwrap();
    grid.update_edit(CellValue::from("renamed"));

    let offline = FnValidator(|_v: CellValue| async {
        Err::<ValidationOutcome, _>(GridError::Validator("service unavailable".into()))
    });
    let payload = block_on(grid.commit_edit(&offline)).unwrap();

    assert_eq!(
        payload.outcome,
        CommitOutcome::RolledBack {
            error: "Validator failed: service unavailable".into()
        }
    );
    assert_eq!(grid.cell_value(position), CellValue::from("item 0"));
}

#[test]
fn test_navigation_continues_while_pending() {
    let mut grid = inventory_grid(50);
    let position = CellPosition::new(2, 3);
    grid.set_focus(position);
    grid.handle_action(NavAction::Enter);
    grid.update_edit(CellValue::from(99.0));

    let Some(CommitRequest::Validate(pending)) = grid.begin_commit() else {
        panic!("changed value must go through validation");
    };
    assert_eq!(grid.edit_session().unwrap().status(), EditStatus::Pending);

    // The user pages away until the pending cell leaves the window...
    for _ in 0..3 {
        grid.handle_action(NavAction::PageDown);
    }
    assert_eq!(grid.focus(), CellPosition::new(32, 3));
    assert!(!grid.visible_window().rows.contains(position.row));
    assert!(grid.render_frame().cells.iter().all(|c| !c.editing));

    // ...and comes back before the verdict arrives
    grid.handle_action(NavAction::FirstCell);
    assert_eq!(grid.focus(), CellPosition::new(0, 0));
    assert!(grid.visible_window().rows.contains(position.row));
    assert_eq!(grid.edit_session().unwrap().status(), EditStatus::Pending);

    let (session, verdict) = block_on(pending.run(&SyncValidator(|_: &CellValue| {
        ValidationOutcome::valid()
    })));
    let payload = grid.finish_commit(session, verdict).unwrap();

    assert_eq!(payload.position, position);
    assert_eq!(grid.cell_value(position), CellValue::Number(99.0));
    assert_eq!(grid.focus(), CellPosition::new(0, 0));
    let shown = grid
        .render_frame()
        .cells
        .into_iter()
        .find(|c| c.position == position && c.region == gridcore::Region::Body)
        .unwrap();
    assert_eq!(shown.content, CellValue::Number(99.0));
}

#[test]
fn test_escape_during_validation_discards_late_verdict() {
    let mut grid = inventory_grid(10);
    let position = CellPosition::new(1, 3);
    let original = grid.cell_value(position);
    grid.open_edit(position).unwrap();
    grid.update_edit(CellValue::from(0.5));

    let Some(CommitRequest::Validate(pending)) = grid.begin_commit() else {
        panic!("expected validation");
    };
    grid.handle_action(NavAction::Escape);
    assert_eq!(grid.edit_session().unwrap().status(), EditStatus::Cancelled);

    let (session, verdict) = block_on(pending.run(&SyncValidator(|_: &CellValue| {
        ValidationOutcome::valid()
    })));
    assert!(matches!(verdict, ValidationVerdict::Aborted));
    assert!(grid.finish_commit(session, verdict).is_none());
    assert_eq!(grid.cell_value(position), original);
}

#[test]
fn test_new_session_supersedes_previous() {
    let mut grid = inventory_grid(10);
    let first = grid.open_edit(CellPosition::new(0, 1)).unwrap();
    grid.update_edit(CellValue::from("draft"));
    let second = grid.open_edit(CellPosition::new(5, 2)).unwrap();

    assert!(second > first);
    let session = grid.edit_session().unwrap();
    assert_eq!(session.id(), second);
    assert_eq!(session.position(), CellPosition::new(5, 2));
    // The abandoned draft never reached the data
    assert_eq!(grid.cell_value(CellPosition::new(0, 1)), CellValue::from("item 0"));
}

#[test]
fn test_non_editable_cells_do_not_open() {
    let mut grid = inventory_grid(10);
    assert!(grid.open_edit(CellPosition::new(0, 0)).is_none());
    assert!(grid.open_edit(CellPosition::new(0, 4)).is_none());
    assert!(grid.open_edit(CellPosition::new(99, 1)).is_none());
    assert!(grid.edit_session().is_none());
}

#[test]
fn test_commit_payload_json_shape() {
    let mut grid = inventory_grid(10);
    grid.open_edit(CellPosition::new(2, 2)).unwrap();
    grid.update_edit(CellValue::from(5));
    let payload = block_on(grid.commit_edit(&SyncValidator(non_negative))).unwrap();

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["columnId"], "qty");
    assert_eq!(json["sourceRow"], 2);
    assert_eq!(json["position"]["row"], 2);
    assert_eq!(json["value"], 5.0);
    assert_eq!(json["outcome"]["kind"], "committed");
}
