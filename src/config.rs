//! Grid configuration.
//!
//! Everything the per-frame functions need besides the schema, the data and the
//! scroll/viewport snapshot. Loaded from JSON with every field optional.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 40.0;

/// Default width for synthesized (unbounded) columns in pixels
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

/// Default number of extra rows rendered above and below the viewport
pub const DEFAULT_OVERSCAN_ROWS: usize = 5;

/// Default number of extra columns rendered left and right of the viewport
pub const DEFAULT_OVERSCAN_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Fixed height of every body row
    pub row_height: f64,
    /// Height of the header row; falls back to `row_height` when absent
    pub header_height: Option<f64>,
    pub overscan_rows: usize,
    pub overscan_columns: usize,
    /// Width of every column past the end of the schema
    pub default_column_width: f64,
    /// Treat the schema as a prefix of an infinite column space
    pub unbounded_columns: bool,
    /// Row field used as the final sort tiebreak
    pub id_column: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: None,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
            overscan_columns: DEFAULT_OVERSCAN_COLUMNS,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            unbounded_columns: false,
            id_column: "id".to_string(),
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(GridError::Config(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        if let Some(h) = self.header_height {
            if !(h.is_finite() && h >= 0.0) {
                return Err(GridError::Config(format!(
                    "header_height must be non-negative, got {h}"
                )));
            }
        }
        if !(self.default_column_width.is_finite() && self.default_column_width > 0.0) {
            return Err(GridError::Config(format!(
                "default_column_width must be positive, got {}",
                self.default_column_width
            )));
        }
        if self.id_column.is_empty() {
            return Err(GridError::Config("id_column must not be empty".into()));
        }
        Ok(())
    }

    pub fn header_height(&self) -> f64 {
        self.header_height.unwrap_or(self.row_height)
    }

    /// Rows moved by Page Up/Down for a viewport of `viewport_height` pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn page_rows(&self, viewport_height: f64) -> usize {
        if !(self.row_height > 0.0 && viewport_height > 0.0) {
            return 1;
        }
        ((viewport_height / self.row_height).floor() as usize).max(1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.header_height(), DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_partial_json() {
        let config =
            GridConfig::from_json(r#"{"rowHeight": 24, "unboundedColumns": true}"#).unwrap();
        assert_eq!(config.row_height, 24.0);
        assert!(config.unbounded_columns);
        assert_eq!(config.overscan_rows, DEFAULT_OVERSCAN_ROWS);
    }

    #[test]
    fn test_rejects_non_positive_row_height() {
        assert!(matches!(
            GridConfig::from_json(r#"{"rowHeight": 0}"#),
            Err(GridError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            GridConfig::from_json("{"),
            Err(GridError::Json(_))
        ));
    }

    #[test]
    fn test_page_rows() {
        let config = GridConfig::default();
        assert_eq!(config.page_rows(600.0), 15);
        assert_eq!(config.page_rows(10.0), 1);
        assert_eq!(config.page_rows(0.0), 1);
    }
}
