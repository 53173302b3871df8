//! Output: delimited text and JSON reports

mod json;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::Table;

pub use json::{write_reports, FileReport};

/// Write header rows then data rows, one line each.
///
/// Cells are joined as they are; quoting already present in a cell passes through.
pub fn write_table<W: Write + ?Sized>(table: &Table, delimiter: char, writer: &mut W) -> Result<()> {
    for row in table.header_rows.iter().chain(&table.rows) {
        writeln!(writer, "{}", row.join(delimiter))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a table to a file, or to stdout when no path is given
pub fn write_table_to(path: Option<&Path>, table: &Table, delimiter: char) -> Result<()> {
    with_writer(path, |writer| write_table(table, delimiter, writer))
}

/// Write plain text lines to a file, or to stdout when no path is given
pub fn write_lines_to(path: Option<&Path>, lines: &[String]) -> Result<()> {
    with_writer(path, |writer| {
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    })
}

fn with_writer(path: Option<&Path>, write: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<()> {
    match path {
        Some(path) => write(&mut BufWriter::new(File::create(path)?)),
        None => write(&mut BufWriter::new(io::stdout().lock())),
    }
}
