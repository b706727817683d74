//! Multi-column sort.
//!
//! Sorting never touches the source rows; it yields a permutation (or a new
//! vector of shared rows). Rows that tie on every active key are ordered by
//! their identifier field, so the result does not depend on the stability of
//! the underlying sort.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::types::{CellValue, Dataset, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    /// Header-click cycle: none → asc → desc → none
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
            SortDirection::None => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortDescriptor {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    pub fn asc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Asc)
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Desc)
    }
}

/// Ordered sort keys; first = primary. Each column id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SortDescriptor>", into = "Vec<SortDescriptor>")]
pub struct SortStack {
    descriptors: Vec<SortDescriptor>,
}

impl From<Vec<SortDescriptor>> for SortStack {
    /// Later duplicates of a column id are dropped.
    fn from(descriptors: Vec<SortDescriptor>) -> Self {
        let mut stack = SortStack::default();
        for d in descriptors {
            if stack.position(&d.column_id).is_none() {
                stack.descriptors.push(d);
            }
        }
        stack
    }
}

impl From<SortStack> for Vec<SortDescriptor> {
    fn from(stack: SortStack) -> Self {
        stack.descriptors
    }
}

impl SortStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn descriptors(&self) -> &[SortDescriptor] {
        &self.descriptors
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors that actually order rows.
    pub fn active(&self) -> impl Iterator<Item = &SortDescriptor> {
        self.descriptors
            .iter()
            .filter(|d| d.direction != SortDirection::None)
    }

    fn position(&self, column_id: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.column_id == column_id)
    }

    /// Sort priority of a column (0 = primary).
    pub fn priority(&self, column_id: &str) -> Option<usize> {
        self.position(column_id)
    }

    pub fn direction(&self, column_id: &str) -> SortDirection {
        self.position(column_id)
            .and_then(|i| self.descriptors.get(i))
            .map_or(SortDirection::None, |d| d.direction)
    }

    /// Set a column's direction, keeping its priority if already present.
    pub fn set(&mut self, column_id: &str, direction: SortDirection) {
        match self.position(column_id).and_then(|i| self.descriptors.get_mut(i)) {
            Some(d) => d.direction = direction,
            None => self
                .descriptors
                .push(SortDescriptor::new(column_id, direction)),
        }
    }

    pub fn remove(&mut self, column_id: &str) {
        self.descriptors.retain(|d| d.column_id != column_id);
    }

    pub fn clear(&mut self) {
        self.descriptors.clear();
    }

    /// Header click: advance the column through none → asc → desc → none.
    ///
    /// `additive` (shift-click) keeps the other keys; otherwise the column
    /// becomes the only key. A column cycling back to none leaves the stack.
    pub fn toggle(&mut self, column_id: &str, additive: bool) {
        let next = self.direction(column_id).next();
        if !additive {
            self.descriptors.retain(|d| d.column_id == column_id);
        }
        if next == SortDirection::None {
            self.remove(column_id);
        } else {
            self.set(column_id, next);
        }
    }
}

/// Locale-style string order: case-insensitive first, lowercase before
/// uppercase on ties, then code points.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}

/// Order two cell values: Null, then numbers (numerically), then dates
/// (chronologically), then everything else by string representation with
/// [`locale_compare`].
///
/// Numbers and dates rank ahead of text rather than comparing as strings against it;
/// mixing numeric and string comparison is not transitive (`2 < 10`,
/// `"10" < "1a"`, `"1a" < "2"`), and sorting needs a total order.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        (CellValue::Null, _) => Ordering::Less,
        (_, CellValue::Null) => Ordering::Greater,
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Number(_), _) => Ordering::Less,
        (_, CellValue::Number(_)) => Ordering::Greater,
        (CellValue::Date(x), CellValue::Date(y)) => x.days.cmp(&y.days),
        (CellValue::Date(_), _) => Ordering::Less,
        (_, CellValue::Date(_)) => Ordering::Greater,
        _ => locale_compare(&a.to_display_string(), &b.to_display_string()),
    }
}

/// Compare two rows under `stack`, falling back to `id_column`.
pub fn compare_rows(a: &Row, b: &Row, stack: &SortStack, id_column: &str) -> Ordering {
    stack
        .active()
        .map(|d| {
            d.direction
                .apply(compare_values(a.get(&d.column_id), b.get(&d.column_id)))
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| {
            locale_compare(
                &a.get(id_column).to_display_string(),
                &b.get(id_column).to_display_string(),
            )
        })
}

/// Precomputed comparison key for one cell; orders exactly like
/// [`compare_values`].
#[derive(Debug)]
enum SortKey {
    Null,
    Number(f64),
    Date(i64),
    Text(String),
}

impl SortKey {
    fn new(value: &CellValue) -> Self {
        match value {
            CellValue::Null => SortKey::Null,
            CellValue::Number(n) => SortKey::Number(*n),
            CellValue::Date(d) => SortKey::Date(d.days),
            other => SortKey::Text(other.to_display_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Number(_) => 1,
            SortKey::Date(_) => 2,
            SortKey::Text(_) => 3,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (SortKey::Date(x), SortKey::Date(y)) => x.cmp(y),
            (SortKey::Text(a), SortKey::Text(b)) => locale_compare(a, b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Permutation of `rows` under `stack`: `order[i]` is the source index of
/// the row shown at logical position `i`.
pub fn sorted_order(rows: &[Arc<Row>], stack: &SortStack, id_column: &str) -> Vec<usize> {
    let active: Vec<&SortDescriptor> = stack.active().collect();

    // (source index, per-descriptor keys, identifier)
    let keyed: Vec<(usize, Vec<SortKey>, String)> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let keys = active
                .iter()
                .map(|d| SortKey::new(row.get(&d.column_id)))
                .collect();
            (index, keys, row.get(id_column).to_display_string())
        })
        .collect();

    let mut keyed = keyed;
    keyed.sort_by(|(ia, ka, ida), (ib, kb, idb)| {
        active
            .iter()
            .zip(ka.iter().zip(kb.iter()))
            .map(|(d, (x, y))| d.direction.apply(x.compare(y)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| locale_compare(ida, idb))
            .then_with(|| ia.cmp(ib))
    });

    tracing::debug!(
        rows = rows.len(),
        keys = active.len(),
        "computed sort order"
    );

    keyed.into_iter().map(|(index, _, _)| index).collect()
}

/// Rows reordered under `stack`; the source is left untouched and rows are shared.
pub fn sort_rows(rows: &[Arc<Row>], stack: &SortStack, id_column: &str) -> Dataset {
    sorted_order(rows, stack, id_column)
        .into_iter()
        .filter_map(|i| rows.get(i).map(Arc::clone))
        .collect()
}
