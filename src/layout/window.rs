//! Visible row/column windows.
//!
//! Rows use fixed heights, so the row window is plain arithmetic. Columns use
//! binary search over [`ColumnMetrics`] offsets, or arithmetic again in
//! unbounded mode where every column past the schema has the default width.

use serde::Serialize;
use std::ops::Range;

use super::ColumnMetrics;
use crate::config::GridConfig;
use crate::types::{ScrollOffset, ViewportSize};

/// Inclusive index range, or an explicit empty marker (never `start > end`
/// when built through [`IndexRange::span`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IndexRange {
    #[default]
    Empty,
    Span {
        start: usize,
        end: usize,
    },
}

impl IndexRange {
    /// Inclusive span; swaps the bounds if they arrive reversed.
    pub fn span(start: usize, end: usize) -> Self {
        IndexRange::Span {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, IndexRange::Empty)
    }

    pub fn start(&self) -> Option<usize> {
        match self {
            IndexRange::Empty => None,
            IndexRange::Span { start, .. } => Some(*start),
        }
    }

    pub fn end(&self) -> Option<usize> {
        match self {
            IndexRange::Empty => None,
            IndexRange::Span { end, .. } => Some(*end),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexRange::Empty => 0,
            IndexRange::Span { start, end } => end.saturating_sub(*start).saturating_add(1),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        match self {
            IndexRange::Empty => false,
            IndexRange::Span { start, end } => (*start..=*end).contains(&index),
        }
    }

    /// Half-open equivalent, for iteration.
    pub fn indices(&self) -> Range<usize> {
        match self {
            IndexRange::Empty => 0..0,
            IndexRange::Span { start, end } => *start..end.saturating_add(1),
        }
    }
}

/// Everything that must be materialized for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleWindow {
    pub rows: IndexRange,
    /// Pinned columns, always rendered regardless of horizontal scroll
    pub pinned_columns: IndexRange,
    /// Scrollable columns (never includes a pinned column)
    pub columns: IndexRange,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_index(value: f64) -> usize {
    // Float-to-int casts saturate: negatives and NaN become 0, huge values usize::MAX.
    value.floor() as usize
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_index(value: f64) -> usize {
    value.ceil() as usize
}

fn positive(value: f64) -> bool {
    value > 0.0 && !value.is_nan()
}

/// Rows to materialize for a vertical scroll position. O(1).
pub fn row_window(
    scroll_top: f64,
    viewport_height: f64,
    row_height: f64,
    row_count: usize,
    overscan_rows: usize,
) -> IndexRange {
    if row_count == 0 || !positive(viewport_height) || !positive(row_height) {
        return IndexRange::Empty;
    }
    let top = scroll_top.max(0.0);
    let last = row_count - 1;

    let start = floor_index(top / row_height)
        .saturating_sub(overscan_rows)
        .min(last);
    let end = ceil_index((top + viewport_height) / row_height)
        .saturating_add(overscan_rows)
        .min(last);

    IndexRange::span(start, end.max(start))
}

/// The always-rendered pinned block.
pub fn pinned_columns(metrics: &ColumnMetrics) -> IndexRange {
    match metrics.pinned_count() {
        0 => IndexRange::Empty,
        n => IndexRange::span(0, n - 1),
    }
}

/// Scrollable columns to materialize for a finite schema. O(log n).
///
/// The pinned block is excluded; it is rendered separately via [`pinned_columns`].
pub fn column_window(
    metrics: &ColumnMetrics,
    scroll_left: f64,
    viewport_width: f64,
    overscan_columns: usize,
) -> IndexRange {
    let Some((left, right)) = scroll_span(metrics, scroll_left, viewport_width) else {
        return IndexRange::Empty;
    };
    let start = metrics.last_offset_at_or_before(left);
    let end = metrics.first_offset_at_or_after(right).saturating_sub(1);
    finish_column_window(metrics, start, end, overscan_columns)
}

/// Exhaustive-scan twin of [`column_window`]. O(n); used to cross-check the search.
pub fn column_window_linear(
    metrics: &ColumnMetrics,
    scroll_left: f64,
    viewport_width: f64,
    overscan_columns: usize,
) -> IndexRange {
    let Some((left, right)) = scroll_span(metrics, scroll_left, viewport_width) else {
        return IndexRange::Empty;
    };
    let offsets = metrics.offsets();
    let start = offsets
        .iter()
        .rposition(|&offset| offset <= left)
        .unwrap_or(0);
    let end = offsets
        .iter()
        .position(|&offset| offset >= right)
        .unwrap_or(offsets.len())
        .saturating_sub(1);
    finish_column_window(metrics, start, end, overscan_columns)
}

/// `(scrollLeft, scrollRight)` in sheet space, or `None` when nothing scrollable is visible.
fn scroll_span(metrics: &ColumnMetrics, scroll_left: f64, viewport_width: f64) -> Option<(f64, f64)> {
    if metrics.column_count() <= metrics.pinned_count() || !positive(viewport_width) {
        return None;
    }
    let left = scroll_left.max(0.0);
    Some((left, left + viewport_width - metrics.pinned_width()))
}

fn finish_column_window(
    metrics: &ColumnMetrics,
    start: usize,
    end: usize,
    overscan_columns: usize,
) -> IndexRange {
    let pinned = metrics.pinned_count();
    let last = metrics.column_count() - 1;

    let start = start
        .max(pinned)
        .saturating_sub(overscan_columns)
        .max(pinned)
        .min(last);
    let end = end
        .max(pinned)
        .saturating_add(overscan_columns)
        .min(last);

    IndexRange::span(start, end.max(start))
}

/// Scrollable columns in unbounded mode: uniform `default_width`, no upper clamp.
pub fn unbounded_column_window(
    metrics: &ColumnMetrics,
    scroll_left: f64,
    viewport_width: f64,
    default_width: f64,
    overscan_columns: usize,
) -> IndexRange {
    if !positive(viewport_width) || !positive(default_width) {
        return IndexRange::Empty;
    }
    let left = scroll_left.max(0.0);
    let pinned = metrics.pinned_count();

    let start = floor_index(left / default_width)
        .saturating_sub(overscan_columns)
        .max(pinned);
    let end = ceil_index((left + viewport_width) / default_width).saturating_add(overscan_columns);

    IndexRange::span(start, end.max(start))
}

/// Full window for one frame, picking the column mode from `config`.
pub fn visible_window(
    metrics: &ColumnMetrics,
    row_count: usize,
    scroll: ScrollOffset,
    viewport: ViewportSize,
    config: &GridConfig,
) -> VisibleWindow {
    if viewport.is_degenerate() {
        return VisibleWindow::default();
    }

    let rows = row_window(
        scroll.top,
        viewport.height,
        config.row_height,
        row_count,
        config.overscan_rows,
    );
    let columns = if config.unbounded_columns {
        unbounded_column_window(
            metrics,
            scroll.left,
            viewport.width,
            config.default_column_width,
            config.overscan_columns,
        )
    } else {
        column_window(metrics, scroll.left, viewport.width, config.overscan_columns)
    };
    let pinned_columns = pinned_columns(metrics);

    tracing::trace!(?rows, ?pinned_columns, ?columns, "visible window");

    VisibleWindow {
        rows,
        pinned_columns,
        columns,
    }
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
    use test_case::test_case;

    fn uniform(count: usize, width: f64, pinned: usize) -> ColumnMetrics {
        let cols: Vec<Column> = (0..count)
            .map(|i| {
                let col = Column::new(format!("c{i}"), width);
                if i < pinned {
                    col.pinned()
                } else {
                    col
                }
            })
            .collect();
        ColumnMetrics::build(&cols)
    }

    #[test]
    fn test_row_window_large_dataset() {
        assert_eq!(
            row_window(4000.0, 600.0, 40.0, 50_000, 5),
            IndexRange::span(95, 120)
        );
    }

    #[test_case(0.0, 600.0, 40.0, 0, 5 ; "no rows")]
    #[test_case(0.0, 0.0, 40.0, 10, 5 ; "zero viewport")]
    #[test_case(0.0, -5.0, 40.0, 10, 5 ; "negative viewport")]
    #[test_case(0.0, 600.0, 0.0, 10, 5 ; "zero row height")]
    fn test_row_window_empty(top: f64, height: f64, row_height: f64, rows: usize, overscan: usize) {
        assert_eq!(row_window(top, height, row_height, rows, overscan), IndexRange::Empty);
    }

    #[test]
    fn test_row_window_clamps_past_end() {
        let range = row_window(1_000_000.0, 600.0, 40.0, 100, 5);
        assert_eq!(range, IndexRange::span(99, 99));
    }

    #[test]
    fn test_row_window_negative_scroll_is_top() {
        assert_eq!(
            row_window(-300.0, 100.0, 20.0, 100, 0),
            row_window(0.0, 100.0, 20.0, 100, 0)
        );
    }

    #[test]
    fn test_pinned_column_excluded_from_scrollable_window() {
        let cols = vec![Column::new("id", 80.0).pinned(), Column::new("name", 200.0)];
        let metrics = ColumnMetrics::build(&cols);
        for overscan in [0, 1, 5, 100] {
            assert_eq!(
                column_window(&metrics, 0.0, 100.0, overscan),
                IndexRange::span(1, 1)
            );
        }
        assert_eq!(pinned_columns(&metrics), IndexRange::span(0, 0));
    }

    #[test]
    fn test_column_window_scrolled() {
        let metrics = uniform(100, 50.0, 0);
        // left = 500 -> column 10; right = 700 -> first offset >= 700 is col 14, step back
        assert_eq!(column_window(&metrics, 500.0, 200.0, 0), IndexRange::span(10, 13));
        assert_eq!(column_window(&metrics, 500.0, 200.0, 2), IndexRange::span(8, 15));
    }

    #[test]
    fn test_column_window_clamps_to_schema() {
        let metrics = uniform(10, 50.0, 0);
        assert_eq!(column_window(&metrics, 10_000.0, 200.0, 0), IndexRange::span(9, 9));
        assert_eq!(column_window(&metrics, 10_000.0, 200.0, 3), IndexRange::span(7, 9));
        assert_eq!(column_window(&metrics, 0.0, 10_000.0, 3), IndexRange::span(0, 9));
    }

    #[test]
    fn test_column_window_empty_cases() {
        assert!(column_window(&ColumnMetrics::default(), 0.0, 100.0, 1).is_empty());
        assert!(column_window(&uniform(3, 10.0, 3), 0.0, 100.0, 1).is_empty());
        assert!(column_window(&uniform(3, 10.0, 0), 0.0, 0.0, 1).is_empty());
    }

    #[test]
    fn test_unbounded_window_has_no_upper_clamp() {
        let metrics = uniform(3, 100.0, 0);
        let range = unbounded_column_window(&metrics, 10_000.0, 450.0, 100.0, 2);
        assert_eq!(range, IndexRange::span(98, 107));
    }

    #[test]
    fn test_unbounded_window_respects_pinned() {
        let metrics = uniform(3, 100.0, 1);
        let range = unbounded_column_window(&metrics, 0.0, 250.0, 100.0, 4);
        assert_eq!(range.start(), Some(1));
        assert_eq!(range.end(), Some(7));
    }

    #[test]
    fn test_index_range_helpers() {
        let range = IndexRange::span(3, 5);
        assert_eq!(range.len(), 3);
        assert!(range.contains(4));
        assert!(!range.contains(6));
        assert_eq!(range.indices().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(IndexRange::Empty.indices().count(), 0);
        assert_eq!(IndexRange::span(5, 3), IndexRange::span(3, 5));
    }

    #[test]
    fn test_hand_built_reversed_span_has_no_underflow() {
        let reversed = IndexRange::Span { start: 5, end: 3 };
        assert_eq!(reversed.len(), 1);
        assert_eq!(reversed.indices().count(), 0);
    }

    #[test]
    fn test_visible_window_degenerate_viewport() {
        let metrics = uniform(5, 100.0, 1);
        let window = visible_window(
            &metrics,
            100,
            ScrollOffset::default(),
            ViewportSize::new(0.0, 400.0),
            &GridConfig::default(),
        );
        assert_eq!(window, VisibleWindow::default());
    }
}
