use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cell_ref::column_label;
use crate::error::{GridError, Result};

/// Informational column type (does not change comparison rules)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    Text,
    Number,
    Boolean,
    Date,
}

/// One column of the grid schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique key into each row
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Width in pixels, must be > 0
    pub width: f64,
    /// Pinned columns must form a contiguous prefix of the schema
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub editable: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
}

impl Column {
    pub fn new(id: impl Into<String>, width: f64) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            width,
            pinned: false,
            editable: false,
            column_type: None,
        }
    }

    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    #[must_use]
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    /// Column past the end of the schema in unbounded mode.
    ///
    /// Id and label are both the spreadsheet-style name ("A", "AB", ...).
    pub fn synthesized(index: usize, width: f64) -> Self {
        let name = column_label(index);
        Self {
            id: name.clone(),
            label: name,
            width,
            pinned: false,
            editable: false,
            column_type: None,
        }
    }
}

/// Schema column at `index`, synthesizing one past the end when `unbounded`.
pub fn column_at(
    columns: &[Column],
    index: usize,
    unbounded: bool,
    default_width: f64,
) -> Option<Column> {
    match columns.get(index) {
        Some(col) => Some(col.clone()),
        None if unbounded => Some(Column::synthesized(index, default_width)),
        None => None,
    }
}

/// Load-time schema check.
///
/// The per-frame functions assume a well-formed schema and do not call this;
/// hosts should run it once when a schema arrives from outside.
pub fn validate_schema(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    let mut pinned_block_open = true;

    for (index, col) in columns.iter().enumerate() {
        if !seen.insert(col.id.as_str()) {
            return Err(GridError::DuplicateColumnId(col.id.clone()));
        }
        if !(col.width.is_finite() && col.width > 0.0) {
            return Err(GridError::InvalidWidth {
                id: col.id.clone(),
                width: col.width,
            });
        }
        if col.pinned && !pinned_block_open {
            return Err(GridError::NonContiguousPinned {
                id: col.id.clone(),
                index,
            });
        }
        if !col.pinned {
            pinned_block_open = false;
        }
    }

    Ok(())
}
