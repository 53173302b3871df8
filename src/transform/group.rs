//! Exclusive column groups: splitting rows apart and merging them back
//!
//! A group is a set of column indices whose values must not share a row with
//! another group's values. Splitting fans a row with several populated groups
//! out into consecutive rows; merging folds such neighbors back together.

use rustc_hash::FxHashSet;

use crate::model::{Row, Table};

/// Indices of the groups holding at least one value in `row`, in partition order
pub fn active_groups(row: &Row, groups: &[Vec<usize>]) -> Vec<usize> {
    groups
        .iter()
        .enumerate()
        .filter(|(_, columns)| columns.iter().any(|&c| !row.is_blank(c)))
        .map(|(i, _)| i)
        .collect()
}

/// Rewrite the table so that no row has values in more than one group.
///
/// A row with `k` active groups becomes `k` consecutive rows, each keeping one
/// group's values in partition order. Columns outside every group are copied
/// to all of them. Returns the number of rows added.
pub fn split_exclusive(table: &mut Table, groups: &[Vec<usize>]) -> usize {
    let mut added = 0;
    let mut index = 0;

    // the table grows while scanning, so the bound is re-read every pass
    while index < table.rows.len() {
        let active = active_groups(&table.rows[index], groups);
        if active.len() >= 2 {
            let original = table.rows[index].clone();

            for (offset, &keep) in active.iter().enumerate().skip(1) {
                let mut copy = original.clone();
                for &group in active.iter().filter(|&&g| g != keep) {
                    copy.set_blank(&groups[group]);
                }
                table.rows.insert(index + offset, copy);
            }

            let row = &mut table.rows[index];
            for &group in &active[1..] {
                row.set_blank(&groups[group]);
            }
            added += active.len() - 1;
        }
        index += 1;
    }

    tracing::debug!("Exclusive split added {} rows", added);
    added
}

/// Fold adjacent single-group rows back into one row.
///
/// Two neighbors merge when their key columns are equal, their active groups do
/// not overlap, and every column outside the keys and groups is equal. The
/// merged row is re-tested against its new neighbor. Returns the number of rows
/// removed.
pub fn merge_exclusive(table: &mut Table, keys: &[usize], groups: &[Vec<usize>]) -> usize {
    let fixed: FxHashSet<usize> = keys
        .iter()
        .chain(groups.iter().flatten())
        .copied()
        .collect();

    let mut removed = 0;
    let mut index = 0;

    while index + 1 < table.rows.len() {
        if !can_merge(&table.rows[index], &table.rows[index + 1], keys, groups, &fixed) {
            index += 1;
            continue;
        }

        let next = table.rows.remove(index + 1);
        let row = &mut table.rows[index];
        for group in active_groups(&next, groups) {
            for &column in &groups[group] {
                row.set_padded(column, next.cell(column));
            }
        }
        removed += 1;
    }

    tracing::debug!("Exclusive merge removed {} rows", removed);
    removed
}

fn can_merge(
    a: &Row,
    b: &Row,
    keys: &[usize],
    groups: &[Vec<usize>],
    fixed: &FxHashSet<usize>,
) -> bool {
    if !a.equal_at(b, keys) {
        return false;
    }

    let a_groups: FxHashSet<usize> = active_groups(a, groups).into_iter().collect();
    let b_groups: FxHashSet<usize> = active_groups(b, groups).into_iter().collect();
    if !a_groups.is_disjoint(&b_groups) {
        return false;
    }

    let width = a.len().max(b.len());
    (0..width)
        .filter(|c| !fixed.contains(c))
        .all(|c| a.cell(c) == b.cell(c))
}
