//! Pre-computed horizontal layout for a column schema.
//!
//! Computed once per schema, enabling O(log n) column lookups by x position.

use serde::Serialize;

use crate::types::Column;

/// Cumulative column geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetrics {
    /// `offsets[i]` = x of column i's left edge; one extra trailing entry for the right edge
    offsets: Vec<f64>,
    /// Sum of all widths (= last offset)
    total_width: f64,
    /// Sum of widths of the leading pinned block
    pinned_width: f64,
    /// Length of the leading pinned block
    pinned_count: usize,
}

impl Default for ColumnMetrics {
    fn default() -> Self {
        Self::build(&[])
    }
}

impl ColumnMetrics {
    /// Build metrics from an ordered schema.
    ///
    /// Only the contiguous pinned prefix counts toward `pinned_width`; a pinned
    /// flag after the first unpinned column is ignored here.
    pub fn build(columns: &[Column]) -> Self {
        let mut offsets = Vec::with_capacity(columns.len() + 1);
        let mut x = 0.0;
        for col in columns {
            offsets.push(x);
            x += col.width;
        }
        offsets.push(x); // Final edge

        let pinned_count = columns.iter().take_while(|c| c.pinned).count();
        let pinned_width = offsets.get(pinned_count).copied().unwrap_or(0.0);

        Self {
            offsets,
            total_width: x,
            pinned_width,
            pinned_count,
        }
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    pub fn pinned_width(&self) -> f64 {
        self.pinned_width
    }

    pub fn pinned_count(&self) -> usize {
        self.pinned_count
    }

    pub fn column_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.column_count() == 0
    }

    pub fn is_pinned(&self, col: usize) -> bool {
        col < self.pinned_count
    }

    /// Left edge of column `col` (also valid for `col == column_count()`, the right edge)
    pub fn offset(&self, col: usize) -> Option<f64> {
        self.offsets.get(col).copied()
    }

    pub fn column_width(&self, col: usize) -> Option<f64> {
        let left = self.offsets.get(col)?;
        let right = self.offsets.get(col + 1)?;
        Some(right - left)
    }

    /// Largest offset index with `offsets[i] <= x` (binary search).
    ///
    /// May return `column_count()` when `x` is at or past the right edge.
    pub fn last_offset_at_or_before(&self, x: f64) -> usize {
        self.offsets
            .partition_point(|&offset| offset <= x)
            .saturating_sub(1)
    }

    /// Smallest offset index with `offsets[i] >= x` (binary search).
    ///
    /// Returns `offsets.len()` when every offset is below `x`.
    pub fn first_offset_at_or_after(&self, x: f64) -> usize {
        self.offsets.partition_point(|&offset| offset < x)
    }

    /// Column containing sheet x position, if any.
    pub fn col_at_x(&self, x: f64) -> Option<usize> {
        if self.is_empty() || x < 0.0 || x >= self.total_width {
            return None;
        }
        Some(self.last_offset_at_or_before(x))
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

    fn schema(widths: &[f64], pinned: usize) -> Vec<Column> {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let col = Column::new(format!("c{i}"), w);
                if i < pinned {
                    col.pinned()
                } else {
                    col
                }
            })
            .collect()
    }

    #[test]
    fn test_basic_metrics() {
        let metrics = ColumnMetrics::build(&schema(&[80.0, 200.0, 120.0], 1));

        assert_eq!(metrics.offsets(), &[0.0, 80.0, 280.0, 400.0]);
        assert_eq!(metrics.total_width(), 400.0);
        assert_eq!(metrics.pinned_count(), 1);
        assert_eq!(metrics.pinned_width(), 80.0);
        assert_eq!(metrics.column_count(), 3);
        assert_eq!(metrics.column_width(1), Some(200.0));
        assert_eq!(metrics.column_width(3), None);
    }

    #[test]
    fn test_empty_schema() {
        let metrics = ColumnMetrics::build(&[]);
        assert_eq!(metrics.offsets(), &[0.0]);
        assert!(metrics.is_empty());
        assert_eq!(metrics.pinned_width(), 0.0);
        assert_eq!(metrics.col_at_x(0.0), None);
    }

    #[test]
    fn test_non_contiguous_pinned_flag_is_ignored() {
        let mut cols = schema(&[50.0, 60.0, 70.0], 1);
        cols[2].pinned = true;
        let metrics = ColumnMetrics::build(&cols);
        assert_eq!(metrics.pinned_count(), 1);
        assert_eq!(metrics.pinned_width(), 50.0);
    }

    #[test]
    fn test_all_pinned() {
        let metrics = ColumnMetrics::build(&schema(&[10.0, 20.0], 2));
        assert_eq!(metrics.pinned_count(), 2);
        assert_eq!(metrics.pinned_width(), 30.0);
    }

    #[test]
    fn test_col_at_x() {
        let metrics = ColumnMetrics::build(&schema(&[64.0, 64.0, 64.0], 0));

        assert_eq!(metrics.col_at_x(0.0), Some(0));
        assert_eq!(metrics.col_at_x(32.0), Some(0));
        assert_eq!(metrics.col_at_x(64.0), Some(1));
        assert_eq!(metrics.col_at_x(64.0 * 2.5), Some(2));
        assert_eq!(metrics.col_at_x(192.0), None);
        assert_eq!(metrics.col_at_x(-1.0), None);
    }

    #[test]
    fn test_offset_searches() {
        let metrics = ColumnMetrics::build(&schema(&[10.0, 10.0, 10.0], 0));
        assert_eq!(metrics.last_offset_at_or_before(15.0), 1);
        assert_eq!(metrics.last_offset_at_or_before(20.0), 2);
        assert_eq!(metrics.last_offset_at_or_before(99.0), 3);
        assert_eq!(metrics.first_offset_at_or_after(15.0), 2);
        assert_eq!(metrics.first_offset_at_or_after(20.0), 2);
        assert_eq!(metrics.first_offset_at_or_after(99.0), 4);
    }
}
