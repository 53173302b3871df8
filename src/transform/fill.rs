//! Filling blank cells of a column

use crate::error::{Result, TableError};
use crate::model::Table;

use super::predicate::RowPredicate;

/// Where the replacement for a blank cell comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillSource {
    /// Always the given value
    Constant(String),
    /// The last non-blank value seen above, starting from the given seed
    Forward(String),
    /// The same row's cell in another column
    Column(usize),
}

impl FillSource {
    /// Column source from an index given as text
    pub fn column_index(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<usize>()
            .map(FillSource::Column)
            .map_err(|_| {
                TableError::InvalidFillSource(format!("column source needs an index: {}", value))
            })
    }
}

/// A fill of one column's blank cells
#[derive(Debug, Clone)]
pub struct ColumnFill {
    column: usize,
    source: FillSource,
    skip_rows: usize,
    predicate: Option<RowPredicate>,
}

impl ColumnFill {
    /// Fill `column` from `source`
    pub fn new(column: usize, source: FillSource) -> Self {
        Self {
            column,
            source,
            skip_rows: 0,
            predicate: None,
        }
    }

    /// Leave the first `skip_rows` data rows alone
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// Only touch rows satisfying the condition
    pub fn with_predicate(mut self, predicate: RowPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Fill the blanks and return how many cells were written.
    ///
    /// Rows failing the condition are passed over entirely and do not update
    /// the forward-fill carry. Rows too short to hold the column are skipped.
    pub fn apply(&self, table: &mut Table) -> usize {
        let mut carry = match &self.source {
            FillSource::Forward(seed) => seed.clone(),
            _ => String::new(),
        };
        let mut filled = 0;
        let mut short_rows = 0;

        for row in table.rows.iter_mut().skip(self.skip_rows) {
            if let Some(predicate) = &self.predicate {
                if !predicate.matches(row) {
                    continue;
                }
            }
            if self.column >= row.len() {
                short_rows += 1;
                continue;
            }

            if row.is_blank(self.column) {
                let value = match &self.source {
                    FillSource::Constant(value) => value.clone(),
                    FillSource::Forward(_) => carry.clone(),
                    FillSource::Column(source) => row.cell(*source).to_string(),
                };
                row.set(self.column, value);
                filled += 1;
            } else if matches!(self.source, FillSource::Forward(_)) {
                carry = row.cell(self.column).to_string();
            }
        }

        if short_rows > 0 {
            tracing::warn!(
                "Skipped {} rows too short to hold column {}",
                short_rows,
                self.column
            );
        }
        tracing::debug!("Filled {} cells in column {}", filled, self.column);
        filled
    }
}
