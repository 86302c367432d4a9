pub mod cell;

pub use cell::Cell;

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::schema::ColumnType;

/// A typed, in-memory table: column names in declared order, one inferred
/// type per column name, and rectangular rows of cell values.
///
/// Tables are immutable by convention. Every operation in this crate takes
/// a table by reference and returns a new one; nothing is ever mutated in
/// place.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    types: HashMap<String, ColumnType>,
    names: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// One column pulled out of a table: its type, its original-case name, and
/// its cells in row order. A derived view with no back-reference to the
/// table it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub ty: ColumnType,
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Table {
    /// Build a table, validating that every row has exactly one cell per
    /// column name and that every name has a type entry.
    pub fn new(
        names: Vec<String>,
        types: HashMap<String, ColumnType>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != names.len() {
                return Err(Error::Shape {
                    row: i,
                    expected: names.len(),
                    actual: row.len(),
                });
            }
        }
        for name in &names {
            if !types.contains_key(name) {
                return Err(Error::Invariant(format!(
                    "no type entry for column `{}`",
                    name
                )));
            }
        }
        Ok(Self { types, names, rows })
    }

    /// Internal constructor for operations that preserve the invariants by
    /// construction (same shape, re-keyed types).
    pub(crate) fn from_parts(
        names: Vec<String>,
        types: HashMap<String, ColumnType>,
        rows: Vec<Vec<Cell>>,
    ) -> Self {
        Self { types, names, rows }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn types(&self) -> &HashMap<String, ColumnType> {
        &self.types
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// The type of the column with exactly this name, if any.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.types.get(name).copied()
    }

    /// Look up a column by name, case-insensitively. The first column whose
    /// lowercased name matches wins.
    pub fn column(&self, name: &str) -> Result<Column> {
        let want = name.to_lowercase();
        let idx = self
            .names
            .iter()
            .position(|n| n.to_lowercase() == want)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        Ok(self.column_at(idx))
    }

    /// All columns, in declared name order.
    pub fn columns(&self) -> Vec<Column> {
        (0..self.names.len()).map(|i| self.column_at(i)).collect()
    }

    fn column_at(&self, idx: usize) -> Column {
        let name = self.names[idx].clone();
        Column {
            ty: self.types[&name],
            name,
            cells: self.rows.iter().map(|row| row[idx].clone()).collect(),
        }
    }
}

impl Column {
    /// Count how often each distinct cell value occurs in this column.
    /// `Null` is a distinct key like any other value. The counts always sum
    /// to the column's cell count.
    pub fn frequencies(&self) -> HashMap<Cell, usize> {
        let mut freqs = HashMap::new();
        for cell in &self.cells {
            *freqs.entry(cell.clone()).or_insert(0) += 1;
        }
        freqs
    }
}
