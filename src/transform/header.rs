//! Multi-row header blocks closed by a `==` separator row

use crate::model::{Row, Table};

/// First-cell prefix marking the end of a header block
pub const SEPARATOR_PREFIX: &str = "==";

/// Join between the names of stacked header cells
const NAME_JOIN: &str = "_";

/// Index of the first row whose first cell starts with `==`
pub fn separator_index(table: &Table) -> Option<usize> {
    table
        .rows
        .iter()
        .position(|row| row.cell(0).starts_with(SEPARATOR_PREFIX))
}

/// Drop every row after the separator. Without a separator the table is kept whole.
pub fn truncate_at_separator(table: &mut Table, keep_separator: bool) {
    if let Some(index) = separator_index(table) {
        let end = if keep_separator { index + 1 } else { index };
        table.rows.truncate(end);
    }
}

/// Flatten stacked header rows into one name per column.
///
/// A blank cell in any row but the last inherits the name on its left, so a
/// group title spans the columns beneath it. Each column name is then the
/// non-blank cells of that column, top to bottom, joined with `_`. The width
/// is taken from the first row.
pub fn flatten_header(table: &Table) -> Vec<String> {
    let width = table.column_count();
    let mut rows: Vec<Row> = table.rows.clone();
    let spanning_rows = rows.len().saturating_sub(1);

    for row in rows.iter_mut().take(spanning_rows) {
        for column in 1..width {
            if row.is_blank(column) {
                let left = row.cell(column - 1).to_string();
                row.set(column, left);
            }
        }
    }

    (0..width)
        .map(|column| {
            rows.iter()
                .map(|row| row.cell(column))
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(NAME_JOIN)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReadOptions;
    use crate::parser::read_table;

    fn trimmed(input: &str) -> Table {
        read_table(input.as_bytes(), &ReadOptions::default().with_trim(true)).unwrap()
    }

    #[test]
    fn test_flatten_three_levels() {
        let table = trimmed(concat!(
            "name,val,c11 ,   ,    ,   ,c12 ,\n",
            "    ,   ,name,val,c21 ,   ,name,val\n",
            "    ,   ,    ,   ,name,val,    ,\n",
        ));
        assert_eq!(
            flatten_header(&table).join(","),
            "name,val,c11_name,c11_val,c11_c21_name,c11_c21_val,c12_name,c12_val"
        );
    }

    #[test]
    fn test_flatten_nested_groups_at_the_end() {
        let table = trimmed(concat!(
            "name,val,c11 ,   ,    ,   ,c12 ,   ,    ,\n",
            "    ,   ,name,val,c21 ,   ,name,val,c22 ,\n",
            "    ,   ,    ,   ,name,val,    ,   ,name,val\n",
        ));
        assert_eq!(
            flatten_header(&table).join(","),
            "name,val,c11_name,c11_val,c11_c21_name,c11_c21_val,c12_name,c12_val,c12_c22_name,c12_c22_val"
        );
    }

    #[test]
    fn test_flatten_single_row_keeps_blanks() {
        let table = trimmed("a,,b\n");
        assert_eq!(flatten_header(&table), vec!["a", "", "b"]);
        assert!(flatten_header(&Table::new()).is_empty());
    }

    #[test]
    fn test_truncate_at_separator() {
        let input = "h1,h2\n==,==\n1,2\n";

        let mut table = trimmed(input);
        assert_eq!(separator_index(&table), Some(1));
        truncate_at_separator(&mut table, true);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1].cells, vec!["==", "=="]);

        let mut table = trimmed(input);
        truncate_at_separator(&mut table, false);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_truncate_without_separator() {
        let mut table = trimmed("a\n\nb\n");
        assert_eq!(separator_index(&table), None);
        truncate_at_separator(&mut table, false);
        assert_eq!(table.row_count(), 3);
    }
}
