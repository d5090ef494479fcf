//! Rows and query results.
//!
//! Column order and row order are exactly what the engine produced. Nothing
//! here sorts, filters, or re-types values.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::ScalarValue;

/// One result row: column name to value, in engine column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, ScalarValue)>,
}

impl Row {
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Append a cell. A repeated column name overwrites the earlier value but
    /// keeps the earlier position, so names stay unique within the row.
    pub fn insert(&mut self, column: impl Into<String>, value: ScalarValue) {
        let column = column.into();
        if let Some(cell) = self.cells.iter_mut().find(|(name, _)| *name == column) {
            cell.1 = value;
        } else {
            self.cells.push((column, value));
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ScalarValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column lookup ignoring ASCII case (the engine echoes identifiers as typed).
    #[must_use]
    pub fn get_ignore_case(&self, column: &str) -> Option<&ScalarValue> {
        self.cells
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &ScalarValue> {
        self.cells.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ScalarValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (S, ScalarValue)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Ordered rows from one statement, plus the engine's column list.
///
/// `columns` is kept even when there are no rows; an empty result is a valid
/// answer and is distinct from a failed query.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Build a result from rows alone, taking the column list from the first row.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.columns().map(String::from).collect())
            .unwrap_or_default();
        Self { columns, rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
