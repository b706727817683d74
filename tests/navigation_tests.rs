//! Focus navigation tests: totality over arbitrary input and grid-level
//! keyboard handling with ensure-visible scrolling.
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
    next_position, ActionOutcome, CellPosition, Direction, Modifiers, NavAction, NavBounds,
};
use proptest::prelude::*;
use test_case::test_case;

fn arb_action() -> impl Strategy<Value = NavAction> {
    prop_oneof![
        Just(NavAction::Move(Direction::Up)),
        Just(NavAction::Move(Direction::Down)),
        Just(NavAction::Move(Direction::Left)),
        Just(NavAction::Move(Direction::Right)),
        Just(NavAction::Tab),
        Just(NavAction::ShiftTab),
        Just(NavAction::Home),
        Just(NavAction::End),
        Just(NavAction::FirstCell),
        Just(NavAction::LastCell),
        Just(NavAction::PageUp),
        Just(NavAction::PageDown),
        Just(NavAction::Enter),
        Just(NavAction::Escape),
    ]
}

proptest! {
    #[test]
    fn prop_bounded_navigation_is_total(
        row in 0usize..10_000,
        col in 0usize..10_000,
        row_count in 0usize..500,
        column_count in 0usize..50,
        page_rows in 0usize..40,
        action in arb_action(),
    ) {
        let bounds = NavBounds::bounded(row_count, column_count, page_rows);
        let next = next_position(CellPosition::new(row, col), action, &bounds);
        if row_count == 0 || column_count == 0 {
            prop_assert_eq!(next, CellPosition::new(0, 0));
        } else {
            prop_assert!(next.row < row_count);
            prop_assert!(next.col < column_count);
        }
    }

    #[test]
    fn prop_unbounded_rows_stay_in_bounds(
        row in 0usize..10_000,
        col in 0usize..10_000,
        row_count in 1usize..500,
        schema_len in 1usize..50,
        action in arb_action(),
    ) {
        let bounds = NavBounds::unbounded(row_count, schema_len, 10);
        let next = next_position(CellPosition::new(row, col), action, &bounds);
        prop_assert!(next.row < row_count);
    }

    #[test]
    fn prop_tab_then_shift_tab_returns(
        row in 0usize..20,
        col in 0usize..6,
    ) {
        let bounds = NavBounds::bounded(20, 6, 5);
        let start = CellPosition::new(row, col);
        let last = CellPosition::new(19, 5);
        prop_assume!(start != last);
        let forward = next_position(start, NavAction::Tab, &bounds);
        prop_assert_eq!(next_position(forward, NavAction::ShiftTab, &bounds), start);
    }
}

#[test_case("ArrowDown", Modifiers::default(), Some(NavAction::Move(Direction::Down)) ; "arrow")]
#[test_case("Tab", Modifiers { shift: true, ..Modifiers::default() }, Some(NavAction::ShiftTab) ; "shift tab")]
#[test_case("Home", Modifiers { ctrl: true, ..Modifiers::default() }, Some(NavAction::FirstCell) ; "ctrl home")]
#[test_case("End", Modifiers { meta: true, ..Modifiers::default() }, Some(NavAction::LastCell) ; "cmd end")]
#[test_case("Escape", Modifiers::default(), Some(NavAction::Escape) ; "escape")]
#[test_case("a", Modifiers::default(), None ; "unmapped key")]
fn test_key_mapping(key: &str, modifiers: Modifiers, expected: Option<NavAction>) {
    assert_eq!(NavAction::from_key(key, modifiers), expected);
}

#[test]
fn test_page_down_scrolls_by_viewport() {
    // 400px viewport / 40px rows = 10 rows per page
    let mut grid = inventory_grid(100);
    let outcome = grid.handle_action(NavAction::PageDown);
    assert_eq!(
        outcome,
        ActionOutcome::Focus {
            position: CellPosition::new(10, 0)
        }
    );
    assert_eq!(grid.scroll().top, 40.0);
}

#[test]
fn test_ctrl_end_then_ctrl_home() {
    let mut grid = inventory_grid(100);
    grid.handle_action(NavAction::LastCell);
    assert_eq!(grid.focus(), CellPosition::new(99, 4));
    // bottom of content, scrolled right so note (500..800) fits in 600px
    assert_eq!(grid.scroll().top, 4000.0 - 400.0);
    assert_eq!(grid.scroll().left, 200.0);

    grid.handle_action(NavAction::FirstCell);
    assert_eq!(grid.focus(), CellPosition::new(0, 0));
    assert_eq!(grid.scroll().top, 0.0);
    // the pinned column never moves horizontal scroll
    assert_eq!(grid.scroll().left, 200.0);
}

#[test]
fn test_boundary_actions_are_ignored() {
    let mut grid = inventory_grid(3);
    assert_eq!(
        grid.handle_action(NavAction::Move(Direction::Up)),
        ActionOutcome::Ignored
    );
    assert_eq!(grid.handle_action(NavAction::ShiftTab), ActionOutcome::Ignored);
}

#[test]
fn test_empty_grid_keeps_origin() {
    let mut grid = inventory_grid(0);
    for action in [NavAction::PageDown, NavAction::LastCell, NavAction::Tab] {
        assert_eq!(grid.handle_action(action), ActionOutcome::Ignored);
    }
    assert_eq!(grid.focus(), CellPosition::new(0, 0));
    assert!(grid.render_frame().window.rows.is_empty());
}

#[test]
fn test_click_hit_test_then_focus() {
    let mut grid = inventory_grid(100);
    grid.scroll_to(gridcore::ScrollOffset::new(200.0, 50.0));
    // x 150 is past the 80px pinned block: sheet x = 200 -> name (80..280)
    let hit = grid.cell_at_point(150.0, 15.0).unwrap();
    assert_eq!(hit, CellPosition::new(5, 1));
    assert_eq!(grid.set_focus(hit), hit);
}
