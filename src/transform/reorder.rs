//! Batch column moves
//!
//! All moves in a batch are simultaneous. Destinations are indices in the table
//! as it looks after every source column has been taken out.

use crate::config::ColumnPosition;
use crate::error::{Result, TableError};
use crate::model::Table;

/// One requested move, with the column values carried between the two phases
struct ColumnMove {
    order: usize,
    from: usize,
    to: usize,
    values: Vec<String>,
}

/// Move several columns at once.
///
/// Columns are removed highest source index first, then inserted highest
/// destination first. Moves sharing a destination are inserted in reverse
/// request order, so the earlier request ends up on the left.
pub fn move_columns(table: &mut Table, from: &[usize], to: &[usize]) -> Result<()> {
    if from.len() != to.len() {
        return Err(TableError::MoveCountMismatch {
            from: from.len(),
            to: to.len(),
        });
    }

    let mut moves: Vec<ColumnMove> = from
        .iter()
        .zip(to)
        .enumerate()
        .map(|(order, (&from, &to))| ColumnMove {
            order,
            from,
            to,
            values: Vec::new(),
        })
        .collect();

    moves.sort_by(|a, b| b.from.cmp(&a.from));
    for mv in &mut moves {
        mv.values = table.column_remove(mv.from);
    }

    moves.sort_by(|a, b| (b.to, b.order).cmp(&(a.to, a.order)));
    for mv in moves {
        tracing::trace!("Column {} -> {}", mv.from, mv.to);
        table.column_insert(ColumnPosition::At(mv.to), mv.values)?;
    }

    Ok(())
}
