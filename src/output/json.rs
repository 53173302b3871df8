//! JSON file report

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::ReadOptions;
use crate::error::Result;
use crate::model::template::{detect_file, HeaderTemplate};
use crate::parser::read_table_from;

/// Shape summary of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file_path: String,
    pub csv_type_name: Option<String>,
    pub header_row_count: Option<usize>,
    pub column_count_min: usize,
    pub column_count_max: usize,
    pub row_count: usize,
}

impl FileReport {
    /// Detect a file's template and measure its rows.
    ///
    /// Counts cover every line of the file, header lines included. An empty
    /// file reports zero for both column counts.
    pub fn build(templates: &[HeaderTemplate], path: &Path, options: &ReadOptions) -> Result<Self> {
        let template = detect_file(templates, path)?;
        let table = read_table_from(Some(path), &options.clone().with_header_rows(0), None)?;
        let (column_count_min, column_count_max) = table.column_count_range().unwrap_or((0, 0));

        Ok(Self {
            file_path: path.display().to_string(),
            csv_type_name: template.map(|t| t.type_name.clone()),
            header_row_count: template.map(HeaderTemplate::row_count),
            column_count_min,
            column_count_max,
            row_count: table.row_count(),
        })
    }
}

/// Write reports as a pretty-printed JSON array
pub fn write_reports<W: Write>(reports: &[FileReport], writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, reports)?;
    writeln!(writer)?;
    Ok(())
}
