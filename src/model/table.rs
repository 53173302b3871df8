//! Table and Row data structures

use crate::config::ColumnPosition;
use crate::error::{Result, TableError};

use super::template::HeaderTemplate;

/// A row of text cells; the empty string means "no value"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<String>,
}

impl Row {
    /// Create a row from cell values
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Create a row of `width` blank cells
    pub fn blank(width: usize) -> Self {
        Self {
            cells: vec![String::new(); width],
        }
    }

    /// Number of cells in this row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell text by column index; cells past the end read as blank
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Check whether a cell is blank
    pub fn is_blank(&self, index: usize) -> bool {
        self.cell(index).is_empty()
    }

    /// Overwrite a cell; writes past the end are dropped
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// Overwrite a cell, growing the row with blanks when needed
    pub fn set_padded(&mut self, index: usize, value: impl Into<String>) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, String::new());
        }
        self.cells[index] = value.into();
    }

    /// Blank every listed cell that exists
    pub fn set_blank(&mut self, indices: &[usize]) {
        for &index in indices {
            self.set(index, String::new());
        }
    }

    /// Indices from `indices` that hold a value in this row
    pub fn non_blank(&self, indices: &[usize]) -> Vec<usize> {
        indices
            .iter()
            .copied()
            .filter(|&i| !self.is_blank(i))
            .collect()
    }

    /// Check whether every listed cell equals the other row's cell
    pub fn equal_at(&self, other: &Row, indices: &[usize]) -> bool {
        indices.iter().all(|&i| self.cell(i) == other.cell(i))
    }

    /// Insert a cell, padding with blanks when the row is shorter than `index`
    fn insert_padded(&mut self, index: usize, value: String) {
        if index > self.cells.len() {
            self.cells.resize(index, String::new());
        }
        self.cells.insert(index, value);
    }

    /// Remove a cell; a missing cell yields a blank
    fn remove_or_blank(&mut self, index: usize) -> String {
        if index < self.cells.len() {
            self.cells.remove(index)
        } else {
            String::new()
        }
    }

    /// Render the row as one line of text, without a line terminator
    pub fn join(&self, delimiter: char) -> String {
        let mut buf = [0u8; 4];
        self.cells.join(&*delimiter.encode_utf8(&mut buf))
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

impl From<Vec<&str>> for Row {
    fn from(cells: Vec<&str>) -> Self {
        Self::new(cells.into_iter().map(String::from).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Header rows plus data rows; only data rows are transformed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Header rows, carried through transformations untouched
    pub header_rows: Vec<Row>,
    /// Data rows in input order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from tokenized rows, the first `header_count` becoming header rows
    pub fn from_rows(mut rows: Vec<Row>, header_count: usize) -> Self {
        let split = header_count.min(rows.len());
        let data = rows.split_off(split);
        Self {
            header_rows: rows,
            rows: data,
        }
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count, taken from the first data row
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Row::len).unwrap_or(0)
    }

    /// Narrowest and widest data row, if any rows exist
    pub fn column_count_range(&self) -> Option<(usize, usize)> {
        let min = self.rows.iter().map(Row::len).min()?;
        let max = self.rows.iter().map(Row::len).max()?;
        Some((min, max))
    }

    fn check_column_length(&self, values: &[String]) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLengthMismatch {
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        Ok(())
    }

    /// Append a column after the last cell of every row
    pub fn column_push(&mut self, values: Vec<String>) -> Result<()> {
        self.column_insert(ColumnPosition::End, values)
    }

    /// Insert a column, one value per data row
    pub fn column_insert(&mut self, position: ColumnPosition, values: Vec<String>) -> Result<()> {
        self.check_column_length(&values)?;
        for (row, value) in self.rows.iter_mut().zip(values) {
            match position {
                ColumnPosition::At(index) => row.insert_padded(index, value),
                ColumnPosition::End => row.cells.push(value),
            }
        }
        Ok(())
    }

    /// Insert a blank column
    pub fn column_insert_empty(&mut self, position: ColumnPosition) {
        for row in &mut self.rows {
            match position {
                ColumnPosition::At(index) => row.insert_padded(index, String::new()),
                ColumnPosition::End => row.cells.push(String::new()),
            }
        }
    }

    /// Remove a column and return its values
    pub fn column_remove(&mut self, index: usize) -> Vec<String> {
        self.rows
            .iter_mut()
            .map(|row| row.remove_or_blank(index))
            .collect()
    }

    /// Move a single column by removing it and inserting it at `to`
    pub fn column_move(&mut self, from: usize, to: usize) {
        for row in &mut self.rows {
            let value = row.remove_or_blank(from);
            row.insert_padded(to, value);
        }
    }

    /// Append a data row
    pub fn row_push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Insert a data row; positions past the end append
    pub fn row_insert(&mut self, index: usize, row: Row) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
    }

    /// Insert a blank row as wide as the first data row
    pub fn row_insert_empty(&mut self, index: usize) {
        let width = self.column_count();
        self.row_insert(index, Row::blank(width));
    }

    /// Remove a data row
    pub fn row_remove(&mut self, index: usize) -> Option<Row> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    /// Remove the rows in `start..end`, clamped to the table
    pub fn row_remove_range(&mut self, start: usize, end: usize) -> Vec<Row> {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        self.rows.drain(start..end).collect()
    }

    /// Insert an independent copy of a row right after it
    pub fn row_duplicate(&mut self, index: usize) -> Option<&mut Row> {
        let copy = self.rows.get(index)?.clone();
        self.rows.insert(index + 1, copy);
        self.rows.get_mut(index + 1)
    }

    /// Move a data row
    pub fn row_move(&mut self, from: usize, to: usize) {
        if let Some(row) = self.row_remove(from) {
            self.row_insert(to, row);
        }
    }

    /// New table holding data-row cells `start..end`
    pub fn select_column_range(&self, start: usize, end: usize) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let end = end.min(row.len());
                let start = start.min(end);
                Row::new(row.cells[start..end].to_vec())
            })
            .collect();
        Table {
            header_rows: Vec::new(),
            rows,
        }
    }

    /// New table holding the listed data-row columns in the listed order
    pub fn select_columns(&self, indices: &[usize]) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row.cell(i)).collect())
            .collect();
        Table {
            header_rows: Vec::new(),
            rows,
        }
    }

    /// Replace the header rows
    pub fn set_header_rows(&mut self, header_rows: Vec<Row>) {
        self.header_rows = header_rows;
    }

    /// Drop the header rows and return them
    pub fn clear_header_rows(&mut self) -> Vec<Row> {
        std::mem::take(&mut self.header_rows)
    }

    /// Put a template's header rows on the table.
    ///
    /// Rejected when the table has data rows whose width differs from the
    /// template's column count.
    pub fn apply_template(&mut self, template: &HeaderTemplate) -> Result<()> {
        if !self.rows.is_empty() && self.column_count() != template.column_count {
            return Err(TableError::HeaderColumnCount {
                name: template.type_name.clone(),
                expected: template.column_count,
                found: self.column_count(),
            });
        }
        self.header_rows = template.header_rows.clone();
        Ok(())
    }
}
