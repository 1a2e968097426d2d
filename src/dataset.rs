//! Tabular category data consumed by radial plots.
//!
//! [`CategoryDataset`] is the interface a host table must provide: ordered
//! row and column keys plus nullable numeric cells. A missing cell (`None`)
//! means "no value" and is never treated as zero.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Read access to a keyed two-dimensional table of nullable values.
pub trait CategoryDataset: fmt::Debug {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Key of row `row`, if it exists.
    fn row_key(&self, row: usize) -> Option<&str>;

    /// Key of column `column`, if it exists.
    fn column_key(&self, column: usize) -> Option<&str>;

    /// Cell value; `None` for an absent cell or out-of-range indices.
    fn value(&self, row: usize, column: usize) -> Option<f64>;

    /// Row keys in order.
    fn row_keys(&self) -> Vec<String> {
        (0..self.row_count())
            .filter_map(|r| self.row_key(r).map(str::to_owned))
            .collect()
    }

    /// Column keys in order.
    fn column_keys(&self) -> Vec<String> {
        (0..self.column_count())
            .filter_map(|c| self.column_key(c).map(str::to_owned))
            .collect()
    }

    /// Index of the row with the given key.
    fn row_index(&self, key: &str) -> Option<usize> {
        (0..self.row_count()).find(|&r| self.row_key(r) == Some(key))
    }

    /// Index of the column with the given key.
    fn column_index(&self, key: &str) -> Option<usize> {
        (0..self.column_count()).find(|&c| self.column_key(c) == Some(key))
    }

    /// True when the table has no rows, no columns, or only absent cells.
    fn is_empty(&self) -> bool {
        let (rows, cols) = (self.row_count(), self.column_count());
        !(0..rows).any(|r| (0..cols).any(|c| self.value(r, c).is_some()))
    }
}

/// Which table dimension supplies the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractOrder {
    /// Rows are series, columns are categories.
    #[default]
    ByRow,
    /// Columns are series, rows are categories.
    ByColumn,
}

impl ExtractOrder {
    /// Map a (series, category) pair to a (row, column) cell address.
    #[must_use]
    pub const fn cell(self, series: usize, category: usize) -> (usize, usize) {
        match self {
            ExtractOrder::ByRow => (series, category),
            ExtractOrder::ByColumn => (category, series),
        }
    }

    /// Number of (series, categories) in `dataset` under this order.
    #[must_use]
    pub fn dimensions(self, dataset: &dyn CategoryDataset) -> (usize, usize) {
        match self {
            ExtractOrder::ByRow => (dataset.row_count(), dataset.column_count()),
            ExtractOrder::ByColumn => (dataset.column_count(), dataset.row_count()),
        }
    }
}

/// Notification that a dataset's contents changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetChangeEvent {
    /// Free-form description of the change, for logging.
    pub description: String,
}

/// Receiver of dataset change notifications.
///
/// Implementors are expected to schedule a redraw; subscription is owned by
/// the host framework that holds both the dataset and its listeners.
pub trait DatasetChangeListener {
    /// Called after the dataset changed.
    fn dataset_changed(&mut self, event: &DatasetChangeEvent);
}

/// Minimal in-memory [`CategoryDataset`] keyed by strings.
///
/// Rows and columns are created on first use, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleCategoryDataset {
    row_keys: Vec<String>,
    column_keys: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl SimpleCategoryDataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, adding its row and column keys if they are new.
    pub fn set_value(&mut self, value: Option<f64>, row_key: &str, column_key: &str) {
        let row = match self.row_keys.iter().position(|k| k == row_key) {
            Some(r) => r,
            None => {
                self.row_keys.push(row_key.to_owned());
                self.cells.push(vec![None; self.column_keys.len()]);
                self.row_keys.len() - 1
            }
        };
        let column = match self.column_keys.iter().position(|k| k == column_key) {
            Some(c) => c,
            None => {
                self.column_keys.push(column_key.to_owned());
                for cells in &mut self.cells {
                    cells.push(None);
                }
                self.column_keys.len() - 1
            }
        };
        self.cells[row][column] = value;
    }

    /// Builder form of [`set_value`](Self::set_value).
    #[must_use]
    pub fn with_value(mut self, value: Option<f64>, row_key: &str, column_key: &str) -> Self {
        self.set_value(value, row_key, column_key);
        self
    }

    /// Build a dataset from a row-major grid. Missing trailing cells are absent.
    #[must_use]
    pub fn from_rows(row_keys: &[&str], column_keys: &[&str], rows: &[&[Option<f64>]]) -> Self {
        let mut dataset = Self::new();
        for (r, row_key) in row_keys.iter().enumerate() {
            for (c, column_key) in column_keys.iter().enumerate() {
                let value = rows.get(r).and_then(|row| row.get(c)).copied().flatten();
                dataset.set_value(value, row_key, column_key);
            }
        }
        dataset
    }
}

impl CategoryDataset for SimpleCategoryDataset {
    fn row_count(&self) -> usize {
        self.row_keys.len()
    }

    fn column_count(&self) -> usize {
        self.column_keys.len()
    }

    fn row_key(&self, row: usize) -> Option<&str> {
        self.row_keys.get(row).map(String::as_str)
    }

    fn column_key(&self, column: usize) -> Option<&str> {
        self.column_keys.get(column).map(String::as_str)
    }

    fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(column)).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimpleCategoryDataset {
        SimpleCategoryDataset::from_rows(
            &["s1", "s2"],
            &["a", "b", "c"],
            &[&[Some(1.0), None, Some(3.0)], &[Some(4.0), Some(5.0), Some(6.0)]],
        )
    }

    #[test]
    fn test_keys_and_values() {
        let ds = sample();
        assert_eq!(ds.row_keys(), vec!["s1", "s2"]);
        assert_eq!(ds.column_keys(), vec!["a", "b", "c"]);
        assert_eq!(ds.value(0, 0), Some(1.0));
        assert_eq!(ds.value(0, 1), None);
        assert_eq!(ds.value(9, 9), None);
        assert_eq!(ds.row_index("s2"), Some(1));
        assert_eq!(ds.column_index("c"), Some(2));
        assert_eq!(ds.column_index("zz"), None);
    }

    #[test]
    fn test_set_value_grows_table() {
        let mut ds = SimpleCategoryDataset::new();
        ds.set_value(Some(1.0), "r1", "c1");
        ds.set_value(Some(2.0), "r2", "c2");
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.value(0, 1), None);
        assert_eq!(ds.value(1, 1), Some(2.0));
        ds.set_value(None, "r2", "c2");
        assert_eq!(ds.value(1, 1), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(SimpleCategoryDataset::new().is_empty());
        let all_null = SimpleCategoryDataset::new().with_value(None, "r", "c");
        assert!(all_null.is_empty());
        assert!(!sample().is_empty());
    }

    #[test]
    fn test_extract_order_mapping() {
        let ds = sample();
        assert_eq!(ExtractOrder::ByRow.dimensions(&ds), (2, 3));
        assert_eq!(ExtractOrder::ByColumn.dimensions(&ds), (3, 2));
        assert_eq!(ExtractOrder::ByRow.cell(1, 2), (1, 2));
        assert_eq!(ExtractOrder::ByColumn.cell(1, 2), (2, 1));
    }
}
