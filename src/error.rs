//! Structured error types for gridcore.
//!
//! The per-frame path (windows, placements, navigation, sorting) never fails;
//! these errors only surface when loading configuration or schemas, and when a
//! validator cannot deliver a verdict.

/// All errors that can occur outside the per-frame path.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Two columns share the same id.
    #[error("Duplicate column id: {0}")]
    DuplicateColumnId(String),

    /// A pinned column appears after an unpinned one.
    #[error("Pinned column {id} at index {index} is not part of the leading pinned block")]
    NonContiguousPinned { id: String, index: usize },

    /// Column width is zero, negative or not finite.
    #[error("Column {id} has invalid width {width}")]
    InvalidWidth { id: String, width: f64 },

    /// Invalid spreadsheet-style column label.
    #[error("Invalid column label: {0}")]
    ColumnLabel(String),

    /// The validator failed to produce a verdict (transport failure, rejected promise).
    #[error("Validator failed: {0}")]
    Validator(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
