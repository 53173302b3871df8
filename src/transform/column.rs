//! Column-wise edits applied to every data row

use std::cmp::Reverse;

use regex::Regex;

use crate::config::ColumnPosition;
use crate::model::Table;

/// Insert `count` blank columns before each position.
///
/// Positions refer to the table before any insertion; they are applied from the
/// highest down so earlier insertions never shift later ones.
pub fn add_columns(table: &mut Table, positions: &[ColumnPosition], count: usize) {
    let mut ordered = positions.to_vec();
    ordered.sort_by_key(|p| {
        Reverse(match p {
            ColumnPosition::End => usize::MAX,
            ColumnPosition::At(i) => *i,
        })
    });

    for position in ordered {
        for _ in 0..count {
            table.column_insert_empty(position);
        }
    }
}

/// Delete columns, highest index first; duplicates are deleted once
pub fn delete_columns(table: &mut Table, indices: &[usize]) {
    let mut ordered = indices.to_vec();
    ordered.sort_unstable_by(|a, b| b.cmp(a));
    ordered.dedup();
    for index in ordered {
        table.column_remove(index);
    }
}

/// Wrap cells in double quotes unless they already start with one
pub fn quote_column(table: &mut Table, column: usize) {
    for row in &mut table.rows {
        if column >= row.len() {
            continue;
        }
        let cell = row.cell(column);
        if cell.len() > 1 && cell.starts_with('"') {
            continue;
        }
        let quoted = format!("\"{}\"", cell);
        row.set(column, quoted);
    }
}

/// Regex substitution on every cell of a column; returns the number of cells changed.
///
/// Replacement text uses `$1` / `${name}` group references.
pub fn replace_in_column(
    table: &mut Table,
    column: usize,
    regex: &Regex,
    replacement: &str,
) -> usize {
    let mut changed = 0;

    for row in &mut table.rows {
        if column >= row.len() {
            continue;
        }
        let replaced = regex.replace_all(row.cell(column), replacement).into_owned();
        if replaced != row.cell(column) {
            row.set(column, replaced);
            changed += 1;
        }
    }

    tracing::debug!("Replaced {} cells in column {}", changed, column);
    changed
}
