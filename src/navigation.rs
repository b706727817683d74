//! Focus navigation.
//!
//! `next_position` is a total function: whatever the input position and action,
//! the result lies inside the grid bounds (or is `(0, 0)` for an empty grid).
//! Edges clamp; only Tab/Shift+Tab wrap between rows.

use serde::{Deserialize, Serialize};

use crate::types::CellPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete input the host has already decoded from a raw event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavAction {
    Move(Direction),
    Tab,
    ShiftTab,
    /// First column of the current row
    Home,
    /// Last column of the current row
    End,
    /// Ctrl/Cmd+Home
    FirstCell,
    /// Ctrl/Cmd+End
    LastCell,
    PageUp,
    PageDown,
    /// Open an edit session on an editable cell
    Enter,
    /// Abort the active edit session
    Escape,
}

/// Keyboard modifier state accompanying a key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    /// Cmd on macOS
    #[serde(default)]
    pub meta: bool,
}

impl NavAction {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to an action.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        let jump = modifiers.ctrl || modifiers.meta;
        let action = match key {
            "ArrowUp" => NavAction::Move(Direction::Up),
            "ArrowDown" => NavAction::Move(Direction::Down),
            "ArrowLeft" => NavAction::Move(Direction::Left),
            "ArrowRight" => NavAction::Move(Direction::Right),
            "Tab" if modifiers.shift => NavAction::ShiftTab,
            "Tab" => NavAction::Tab,
            "Home" if jump => NavAction::FirstCell,
            "Home" => NavAction::Home,
            "End" if jump => NavAction::LastCell,
            "End" => NavAction::End,
            "PageUp" => NavAction::PageUp,
            "PageDown" => NavAction::PageDown,
            "Enter" => NavAction::Enter,
            "Escape" | "Esc" => NavAction::Escape,
            _ => return None,
        };
        Some(action)
    }
}

/// Horizontal extent of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnBound {
    Bounded(usize),
    /// No upper limit; `schema_len` is the finite prefix End/Ctrl+End jump to
    Unbounded { schema_len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavBounds {
    pub row_count: usize,
    pub columns: ColumnBound,
    /// Rows moved by Page Up/Down
    pub page_rows: usize,
}

impl NavBounds {
    pub fn bounded(row_count: usize, column_count: usize, page_rows: usize) -> Self {
        Self {
            row_count,
            columns: ColumnBound::Bounded(column_count),
            page_rows,
        }
    }

    pub fn unbounded(row_count: usize, schema_len: usize, page_rows: usize) -> Self {
        Self {
            row_count,
            columns: ColumnBound::Unbounded { schema_len },
            page_rows,
        }
    }

    fn is_empty(&self) -> bool {
        self.row_count == 0 || matches!(self.columns, ColumnBound::Bounded(0))
    }

    fn last_row(&self) -> usize {
        self.row_count.saturating_sub(1)
    }

    /// Column End/Ctrl+End/Shift+Tab-wrap land on.
    fn last_col(&self) -> usize {
        match self.columns {
            ColumnBound::Bounded(n) => n.saturating_sub(1),
            ColumnBound::Unbounded { schema_len } => schema_len.saturating_sub(1),
        }
    }

    fn clamp_col(&self, col: usize) -> usize {
        match self.columns {
            ColumnBound::Bounded(n) => col.min(n.saturating_sub(1)),
            ColumnBound::Unbounded { .. } => col,
        }
    }

    /// Pull an arbitrary position into bounds.
    pub fn clamp(&self, position: CellPosition) -> CellPosition {
        if self.is_empty() {
            return CellPosition::default();
        }
        CellPosition::new(position.row.min(self.last_row()), self.clamp_col(position.col))
    }

    pub fn contains(&self, position: CellPosition) -> bool {
        !self.is_empty() && self.clamp(position) == position
    }
}

/// Next focus position for `action`.
///
/// Enter and Escape do not move focus; their edit-session effects are handled
/// by [`crate::grid::GridState::handle_action`].
pub fn next_position(position: CellPosition, action: NavAction, bounds: &NavBounds) -> CellPosition {
    if bounds.is_empty() {
        return CellPosition::default();
    }
    let pos = bounds.clamp(position);
    let last_row = bounds.last_row();

    let next = match action {
        NavAction::Move(direction) => return handle_arrow(pos, direction, bounds),
        NavAction::Tab => match bounds.columns {
            ColumnBound::Unbounded { .. } => CellPosition::new(pos.row, pos.col.saturating_add(1)),
            ColumnBound::Bounded(_) if pos.col < bounds.last_col() => {
                CellPosition::new(pos.row, pos.col + 1)
            }
            ColumnBound::Bounded(_) if pos.row < last_row => CellPosition::new(pos.row + 1, 0),
            ColumnBound::Bounded(_) => pos,
        },
        NavAction::ShiftTab => {
            if pos.col > 0 {
                CellPosition::new(pos.row, pos.col - 1)
            } else if pos.row > 0 {
                CellPosition::new(pos.row - 1, bounds.last_col())
            } else {
                pos
            }
        }
        NavAction::Home => CellPosition::new(pos.row, 0),
        NavAction::End => CellPosition::new(pos.row, bounds.last_col()),
        NavAction::FirstCell => CellPosition::new(0, 0),
        NavAction::LastCell => CellPosition::new(last_row, bounds.last_col()),
        NavAction::PageUp => {
            CellPosition::new(pos.row.saturating_sub(bounds.page_rows.max(1)), pos.col)
        }
        NavAction::PageDown => CellPosition::new(
            pos.row.saturating_add(bounds.page_rows.max(1)).min(last_row),
            pos.col,
        ),
        NavAction::Enter | NavAction::Escape => pos,
    };

    bounds.clamp(next)
}

/// Arrow-key movement: clamps at every edge except Right in unbounded mode.
pub fn handle_arrow(position: CellPosition, direction: Direction, bounds: &NavBounds) -> CellPosition {
    if bounds.is_empty() {
        return CellPosition::default();
    }
    let pos = bounds.clamp(position);
    let next = match direction {
        Direction::Up => CellPosition::new(pos.row.saturating_sub(1), pos.col),
        Direction::Down => CellPosition::new(pos.row.saturating_add(1), pos.col),
        Direction::Left => CellPosition::new(pos.row, pos.col.saturating_sub(1)),
        Direction::Right => CellPosition::new(pos.row, pos.col.saturating_add(1)),
    };
    bounds.clamp(next)
}
