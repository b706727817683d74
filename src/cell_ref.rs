//! Spreadsheet-style column labels and cell references.
//!
//! Labels use bijective base-26: there is no zero digit, so after `Z` comes
//! `AA`, after `AZ` comes `BA`, and after `ZZ` comes `AAA`.

use crate::error::{GridError, Result};
use crate::types::CellPosition;

/// Label for the 0-indexed column `index` (`0 -> "A"`, `25 -> "Z"`, `26 -> "AA"`).
#[allow(clippy::cast_possible_truncation)]
pub fn column_label(index: usize) -> String {
    // Work on the 1-based column number: each digit is in 1..=26.
    let mut n = index as u128 + 1;
    let mut digits = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        digits.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Parse a column label like "AB" into its 0-indexed column.
///
/// Case-insensitive. `$` markers are ignored, matching absolute references.
pub fn parse_column_label(label: &str) -> Result<usize> {
    let mut col: usize = 0;
    let mut saw_col = false;

    for ch in label.trim().chars() {
        if ch == '$' {
            continue;
        }
        if !ch.is_ascii_alphabetic() {
            return Err(GridError::ColumnLabel(label.to_string()));
        }
        let digit = (ch.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(|| GridError::ColumnLabel(label.to_string()))?;
        saw_col = true;
    }

    if !saw_col {
        return Err(GridError::ColumnLabel(label.to_string()));
    }

    Ok(col - 1)
}

/// Parse a cell reference like "B12" into a 0-indexed position.
pub fn parse_cell_ref(cell_ref: &str) -> Option<CellPosition> {
    let trimmed = cell_ref.trim();
    let split = trimmed
        .char_indices()
        .find(|(_, ch)| ch.is_ascii_digit())
        .map(|(i, _)| i)?;
    let (letters, digits) = trimmed.split_at(split);
    let col = parse_column_label(letters).ok()?;
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(CellPosition::new(row - 1, col))
}

/// Format a position as a cell reference ("A1" is `(0, 0)`).
pub fn format_cell_ref(position: CellPosition) -> String {
    format!("{}{}", column_label(position.col), position.row + 1)
}
