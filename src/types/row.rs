use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::CellValue;

static NULL_VALUE: CellValue = CellValue::Null;

/// A record keyed by column id.
///
/// Rows are never mutated in place once handed to the engine; an edit produces
/// a new row via [`Row::with_value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

/// Ordered rows. `Arc` lets successive dataset versions share untouched rows.
pub type Dataset = Vec<Arc<Row>>;

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `column_id`, or `Null` when the row has no such key.
    pub fn get(&self, column_id: &str) -> &CellValue {
        self.cells.get(column_id).unwrap_or(&NULL_VALUE)
    }

    pub fn contains(&self, column_id: &str) -> bool {
        self.cells.contains_key(column_id)
    }

    /// Builder-style insert used while constructing a row.
    #[must_use]
    pub fn with(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column_id.into(), value.into());
        self
    }

    /// Copy of this row with one value replaced.
    #[must_use]
    pub fn with_value(&self, column_id: &str, value: CellValue) -> Row {
        let mut cells = self.cells.clone();
        cells.insert(column_id.to_string(), value);
        Row { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, CellValue)>>(iter: T) -> Self {
        Row {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Wrap plain rows for use as a [`Dataset`].
pub fn dataset_from_rows(rows: Vec<Row>) -> Dataset {
    rows.into_iter().map(Arc::new).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_null() {
        let row = Row::new().with("id", "r1");
        assert!(row.get("missing").is_null());
        assert_eq!(row.get("id"), &CellValue::from("r1"));
    }

    #[test]
    fn test_with_value_leaves_original_untouched() {
        let row = Row::new().with("id", "r1").with("qty", 3);
        let edited = row.with_value("qty", CellValue::from(4));
        assert_eq!(row.get("qty"), &CellValue::from(3));
        assert_eq!(edited.get("qty"), &CellValue::from(4));
        assert_eq!(edited.get("id"), &CellValue::from("r1"));
    }

    #[test]
    fn test_row_json_is_plain_object() {
        let row: Row = serde_json::from_str(r#"{"id": "a", "n": 2}"#).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("n"), &CellValue::from(2));
    }
}
