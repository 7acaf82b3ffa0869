//! In-memory tabular dataset.
//!
//! Records are stored row-major as owned strings, aligned with an ordered
//! list of column names. The dataset is immutable once built; every stage of
//! the pipeline borrows it.

use std::collections::{HashMap, HashSet};

use crate::{KanonError, Result};

/// An ordered sequence of records over named columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Builds a dataset from column names and row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`KanonError::InvalidInput`] if a column name repeats or a row
    /// does not have exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(KanonError::invalid_input(
                    column.clone(),
                    "duplicate column name",
                ));
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(KanonError::invalid_input(
                    format!("record[{index}]"),
                    format!(
                        "expected {} cells, found {}",
                        columns.len(),
                        row.len()
                    ),
                ));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Builds a dataset from column→value maps, laid out in `columns` order.
    ///
    /// # Errors
    ///
    /// Returns [`KanonError::InvalidInput`] if a record lacks one of the
    /// columns or carries a column that is not listed.
    pub fn from_records<I>(columns: Vec<String>, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = HashMap<String, String>>,
    {
        let mut rows = Vec::new();
        for (index, mut record) in records.into_iter().enumerate() {
            let mut row = Vec::with_capacity(columns.len());
            for column in &columns {
                let value = record.remove(column).ok_or_else(|| {
                    KanonError::invalid_input(
                        column.clone(),
                        format!("column missing from record[{index}]"),
                    )
                })?;
                row.push(value);
            }
            if let Some(extra) = record.into_keys().next() {
                return Err(KanonError::invalid_input(
                    extra,
                    format!("record[{index}] has a column not present in the header"),
                ));
            }
            rows.push(row);
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of cells across the whole table.
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Iterates over one column's cells in record order.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        assert!(
            column < self.columns.len(),
            "column index {column} out of range for {} columns",
            self.columns.len()
        );
        self.rows.iter().map(move |row| row[column].as_str())
    }
}
