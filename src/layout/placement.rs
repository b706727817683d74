//! Cell address to pixel position mapping.
//!
//! Pinned-column compensation depends on the region:
//! - Header: the header strip does not scroll with the body, so pinned columns
//!   sit at their natural offset and scrollable ones shift by `-scroll_left`.
//! - Body: the whole body block (pinned columns included) is translated by the
//!   container's scroll, so pinned columns are pushed by `+scroll_left` to stay
//!   put on screen while scrollable ones use `offset - scroll_left`.

use serde::Serialize;

use super::ColumnMetrics;
use crate::config::GridConfig;
use crate::types::{CellPosition, Region, ScrollOffset};

/// Paint order; higher tiers paint above lower ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StackTier {
    ScrollableCell = 1,
    PinnedCell = 2,
    ScrollableHeader = 3,
    PinnedHeader = 4,
}

impl StackTier {
    pub fn for_cell(region: Region, pinned: bool) -> Self {
        match (region, pinned) {
            (Region::Header, true) => StackTier::PinnedHeader,
            (Region::Header, false) => StackTier::ScrollableHeader,
            (Region::Body, true) => StackTier::PinnedCell,
            (Region::Body, false) => StackTier::ScrollableCell,
        }
    }

    pub fn z_index(self) -> u8 {
        self as u8
    }
}

/// Where one cell is painted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub z_index: u8,
}

/// Sheet-space left edge and width of column `col`.
///
/// Past the schema: `col * default_width` in unbounded mode, the schema's right
/// edge with zero width otherwise.
#[allow(clippy::cast_precision_loss)]
pub fn column_extent(metrics: &ColumnMetrics, col: usize, config: &GridConfig) -> (f64, f64) {
    match (metrics.offset(col), metrics.column_width(col)) {
        (Some(x), Some(width)) => (x, width),
        _ if config.unbounded_columns => (
            col as f64 * config.default_column_width,
            config.default_column_width,
        ),
        _ => (metrics.total_width(), 0.0),
    }
}

/// Position and stacking order of a cell.
///
/// Body cells get `y = row * row_height`; header cells get `y = 0` and the
/// caller places the header strip itself.
#[allow(clippy::cast_precision_loss)]
pub fn place_cell(
    position: CellPosition,
    region: Region,
    metrics: &ColumnMetrics,
    scroll: ScrollOffset,
    config: &GridConfig,
) -> Placement {
    let pinned = metrics.is_pinned(position.col);
    let (offset, width) = column_extent(metrics, position.col, config);

    let x = match (region, pinned) {
        (Region::Header, true) => offset,
        (Region::Body, true) => offset + scroll.left,
        (_, false) => offset - scroll.left,
    };
    let y = match region {
        Region::Header => 0.0,
        Region::Body => position.row as f64 * config.row_height,
    };

    Placement {
        x,
        y,
        width,
        z_index: StackTier::for_cell(region, pinned).z_index(),
    }
}

/// Inverse mapping for hit testing: body viewport point → cell.
///
/// `(x, y)` is relative to the body viewport's top-left corner (below the header).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cell_at_point(
    x: f64,
    y: f64,
    metrics: &ColumnMetrics,
    scroll: ScrollOffset,
    row_count: usize,
    config: &GridConfig,
) -> Option<CellPosition> {
    if x < 0.0 || y < 0.0 || !(config.row_height > 0.0) {
        return None;
    }

    let row = ((y + scroll.top.max(0.0)) / config.row_height).floor() as usize;
    if row >= row_count {
        return None;
    }

    let col = if x < metrics.pinned_width() {
        metrics.col_at_x(x)?
    } else {
        let sheet_x = x + scroll.left.max(0.0);
        match metrics.col_at_x(sheet_x) {
            Some(col) => col.max(metrics.pinned_count()),
            None if config.unbounded_columns && sheet_x >= metrics.total_width() => {
                ((sheet_x / config.default_column_width).floor() as usize)
                    .max(metrics.column_count())
            }
            None => return None,
        }
    };

    Some(CellPosition::new(row, col))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn metrics() -> ColumnMetrics {
        ColumnMetrics::build(&[
            Column::new("id", 80.0).pinned(),
            Column::new("name", 200.0),
            Column::new("qty", 100.0),
        ])
    }

    #[test]
    fn test_body_pinned_column_counteracts_scroll() {
        let scroll = ScrollOffset::new(0.0, 150.0);
        let p = place_cell(
            CellPosition::new(3, 0),
            Region::Body,
            &metrics(),
            scroll,
            &GridConfig::default(),
        );
        assert_eq!(p.x, 150.0);
        assert_eq!(p.y, 120.0);
        assert_eq!(p.z_index, 2);
    }

    #[test]
    fn test_header_pinned_column_is_fixed() {
        let scroll = ScrollOffset::new(500.0, 150.0);
        let p = place_cell(
            CellPosition::new(0, 0),
            Region::Header,
            &metrics(),
            scroll,
            &GridConfig::default(),
        );
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.z_index, 4);
    }

    #[test]
    fn test_scrollable_columns_shift_left_in_both_regions() {
        let scroll = ScrollOffset::new(0.0, 150.0);
        let config = GridConfig::default();
        for region in [Region::Header, Region::Body] {
            let p = place_cell(CellPosition::new(0, 2), region, &metrics(), scroll, &config);
            assert_eq!(p.x, 280.0 - 150.0);
            assert_eq!(p.width, 100.0);
        }
    }

    #[test]
    fn test_stacking_order() {
        assert!(StackTier::PinnedHeader > StackTier::ScrollableHeader);
        assert!(StackTier::ScrollableHeader > StackTier::PinnedCell);
        assert!(StackTier::PinnedCell > StackTier::ScrollableCell);
    }

    #[test]
    fn test_unbounded_columns_use_default_width() {
        let config = GridConfig {
            unbounded_columns: true,
            ..GridConfig::default()
        };
        let p = place_cell(
            CellPosition::new(0, 10),
            Region::Body,
            &metrics(),
            ScrollOffset::default(),
            &config,
        );
        assert_eq!(p.x, 1000.0);
        assert_eq!(p.width, 100.0);
    }

    #[test]
    fn test_bounded_past_schema_collapses_to_right_edge() {
        let p = place_cell(
            CellPosition::new(0, 10),
            Region::Body,
            &metrics(),
            ScrollOffset::default(),
            &GridConfig::default(),
        );
        assert_eq!(p.x, 380.0);
        assert_eq!(p.width, 0.0);
    }

    #[test]
    fn test_cell_at_point() {
        let config = GridConfig::default();
        let m = metrics();
        let scroll = ScrollOffset::new(400.0, 150.0);

        // Over the pinned block: scroll does not matter horizontally
        assert_eq!(
            cell_at_point(10.0, 5.0, &m, scroll, 100, &config),
            Some(CellPosition::new(10, 0))
        );
        // sheet x = 100 + 150 = 250 -> column 1
        assert_eq!(
            cell_at_point(100.0, 45.0, &m, scroll, 100, &config),
            Some(CellPosition::new(11, 1))
        );
        // Beyond the last row
        assert_eq!(cell_at_point(100.0, 45.0, &m, scroll, 5, &config), None);
        // Beyond the last column in bounded mode
        assert_eq!(cell_at_point(300.0, 0.0, &m, scroll, 100, &config), None);
    }
}
