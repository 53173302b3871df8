//! Delimited text reader

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::config::ReadOptions;
use crate::error::{Result, TableError};
use crate::model::{HeaderTemplate, Row, Table};

use super::tokenizer::split_fields;

/// Read lines without their terminators, stopping after `max_lines` when given
pub fn read_lines<R: BufRead>(mut reader: R, max_lines: Option<usize>) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = String::new();

    while max_lines.map_or(true, |max| lines.len() < max) {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let line = buf
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&buf);
        lines.push(line.to_string());
    }

    Ok(lines)
}

/// Read lines from a file
pub fn read_file_lines(path: &Path, max_lines: Option<usize>) -> Result<Vec<String>> {
    let file = File::open(path)?;
    read_lines(BufReader::new(file), max_lines)
}

/// Tokenize every line of a stream into a table
pub fn read_table<R: BufRead>(reader: R, options: &ReadOptions) -> Result<Table> {
    read_table_with_template(reader, options, None)
}

/// Tokenize a stream, taking the header row count from a template when given.
///
/// With a template, the header rows read must equal the template's rows.
pub fn read_table_with_template<R: BufRead>(
    reader: R,
    options: &ReadOptions,
    template: Option<&HeaderTemplate>,
) -> Result<Table> {
    let rows: Vec<Row> = read_lines(reader, None)?
        .iter()
        .map(|line| Row::new(split_fields(line, options.delimiter, options.trim)))
        .collect();

    let header_count = template.map_or(options.header_rows, HeaderTemplate::row_count);
    let table = Table::from_rows(rows, header_count);

    if let Some(template) = template {
        if table.header_rows != template.header_rows {
            return Err(TableError::HeaderMismatch(template.type_name.clone()));
        }
    }

    tracing::debug!(
        "Read {} header rows and {} data rows",
        table.header_rows.len(),
        table.row_count()
    );
    Ok(table)
}

/// Read a table from a file, or from stdin when no path is given
pub fn read_table_from(
    path: Option<&Path>,
    options: &ReadOptions,
    template: Option<&HeaderTemplate>,
) -> Result<Table> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            read_table_with_template(BufReader::new(file), options, template)
        }
        None => read_table_with_template(io::stdin().lock(), options, template),
    }
}
