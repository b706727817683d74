//! Layout engine: column geometry, visible windows and cell placement.
//!
//! This module handles:
//! - Pre-computing cumulative column offsets and the pinned prefix
//! - Computing the row/column windows to materialize, with overscan
//! - Binary search for efficient column lookup at an x position
//! - Mapping cells to pixel positions and stacking tiers, pinned columns included

mod metrics;
mod placement;
mod window;

pub use metrics::ColumnMetrics;
pub use placement::{cell_at_point, column_extent, place_cell, Placement, StackTier};
pub use window::{
    column_window, column_window_linear, pinned_columns, row_window, unbounded_column_window,
    visible_window, IndexRange, VisibleWindow,
};
