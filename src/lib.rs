//! gridcore - headless virtualized-grid engine
//!
//! Computes everything a table renderer needs without touching the DOM:
//! - Which rows and columns to materialize for a scroll position (with overscan)
//! - Pixel placement and stacking order, pinned columns included
//! - Keyboard focus movement over bounded or unbounded column spaces
//! - Validated single-cell edits with rollback
//! - Deterministic multi-column sort
//!
//! Per-frame functions are pure and never fail; out-of-range input clamps.
//!
//! # Usage (Rust)
//!
//! ```
//! use gridcore::{dataset_from_rows, Column, GridConfig, GridState, Row, ViewportSize};
//!
//! let schema = vec![Column::new("id", 80.0).pinned(), Column::new("name", 200.0)];
//! let rows = dataset_from_rows(vec![Row::new().with("id", "r1").with("name", "Ada")]);
//! let mut grid = GridState::new(GridConfig::default(), schema, rows);
//! grid.set_viewport(ViewportSize::new(600.0, 400.0));
//! let frame = grid.render_frame();
//! assert!(!frame.cells.is_empty());
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridEngine } from 'gridcore';
//! await init();
//! const grid = new GridEngine(columns, rows, { rowHeight: 32 });
//! grid.setViewport(width, height);
//! paint(grid.renderFrame());
//! ```

pub mod cell_ref;
pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod layout;
pub mod navigation;
pub mod sort;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

use wasm_bindgen::prelude::*;

pub use config::GridConfig;
pub use editor::{CommitOutcome, CommitPayload, EditSession, EditStatus, ValidationOutcome, Validator};
pub use error::{GridError, Result};
pub use grid::{ActionOutcome, GridState, RenderCell, RenderFrame};
pub use layout::{ColumnMetrics, IndexRange, Placement, VisibleWindow};
pub use navigation::{next_position, Direction, Modifiers, NavAction, NavBounds};
pub use sort::{SortDescriptor, SortDirection, SortStack};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
