//! Header templates: known header blocks used to recognize and relabel files

use std::fs;
use std::path::Path;

use crate::config::ReadOptions;
use crate::error::{Result, TableError};
use crate::parser::{read_file_lines, split_fields};

use super::table::Row;

/// File name suffix that marks a header template
pub const TEMPLATE_SUFFIX: &str = "_header.csv";

/// A named block of header rows with its expected column count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    /// Type name, the file name without `_header.csv`
    pub type_name: String,
    /// Raw header lines without terminators
    pub header_lines: Vec<String>,
    /// Tokenized header rows
    pub header_rows: Vec<Row>,
    /// Field count of the first header row
    pub column_count: usize,
}

impl HeaderTemplate {
    /// Build a template from raw header lines
    pub fn from_lines(
        type_name: impl Into<String>,
        header_lines: Vec<String>,
        options: &ReadOptions,
    ) -> Result<Self> {
        let type_name = type_name.into();
        if header_lines.is_empty() {
            return Err(TableError::InvalidTemplate(format!(
                "'{}' has no header rows",
                type_name
            )));
        }

        let header_rows: Vec<Row> = header_lines
            .iter()
            .map(|line| Row::new(split_fields(line, options.delimiter, options.trim)))
            .collect();
        let column_count = header_rows.first().map(Row::len).unwrap_or(0);

        Ok(Self {
            type_name,
            header_lines,
            header_rows,
            column_count,
        })
    }

    /// Read a template file
    pub fn read(path: &Path, options: &ReadOptions) -> Result<Self> {
        let lines = read_file_lines(path, None)?;
        Self::from_lines(type_name_for(path), lines, options)
    }

    /// Number of header rows
    pub fn row_count(&self) -> usize {
        self.header_rows.len()
    }

    /// Check whether a file's leading lines start with this template
    pub fn matches_lines(&self, lines: &[String]) -> bool {
        lines.len() >= self.header_lines.len()
            && lines[..self.header_lines.len()] == self.header_lines[..]
    }
}

/// Type name for a template path
fn type_name_for(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    match file_name.strip_suffix(TEMPLATE_SUFFIX) {
        Some(name) => name.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string(),
    }
}

/// Read every `*_header.csv` template in a directory.
///
/// The list is ordered by header row count, longest first, so that a template
/// sharing its first lines with a shorter one is tried before it.
pub fn read_template_dir(dir: &Path, options: &ReadOptions) -> Result<Vec<HeaderTemplate>> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(TEMPLATE_SUFFIX))
        })
        .collect();
    paths.sort();

    let mut templates = paths
        .iter()
        .map(|path| HeaderTemplate::read(path, options))
        .collect::<Result<Vec<_>>>()?;
    templates.sort_by(|a, b| b.row_count().cmp(&a.row_count()));

    tracing::debug!(
        "Loaded {} header templates from {}",
        templates.len(),
        dir.display()
    );
    Ok(templates)
}

/// First template whose header lines prefix `lines`
pub fn detect<'a>(templates: &'a [HeaderTemplate], lines: &[String]) -> Option<&'a HeaderTemplate> {
    templates.iter().find(|t| t.matches_lines(lines))
}

/// Detect the template of a file by reading only as many lines as the longest template
pub fn detect_file<'a>(
    templates: &'a [HeaderTemplate],
    path: &Path,
) -> Result<Option<&'a HeaderTemplate>> {
    let max_rows = templates.iter().map(HeaderTemplate::row_count).max();
    let Some(max_rows) = max_rows else {
        return Ok(None);
    };
    let lines = read_file_lines(path, Some(max_rows))?;
    Ok(detect(templates, &lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn template(name: &str, items: &[&str]) -> Result<HeaderTemplate> {
        HeaderTemplate::from_lines(name, lines(items), &ReadOptions::default())
    }

    #[test]
    fn test_from_lines() {
        let template = template("sales", &["a,b,c", "x,,z"]).unwrap();
        assert_eq!(template.row_count(), 2);
        assert_eq!(template.column_count, 3);
        assert_eq!(template.header_rows[1].cells, vec!["x", "", "z"]);
    }

    #[test]
    fn test_from_lines_rejects_empty() {
        assert!(template("none", &[]).is_err());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name_for(Path::new("dir/sales_header.csv")), "sales");
        assert_eq!(type_name_for(Path::new("dir/other.csv")), "other");
    }

    #[test]
    fn test_detect_prefers_longest() {
        let short = template("short", &["a,b"]).unwrap();
        let long = template("long", &["a,b", "c,d"]).unwrap();
        let templates = vec![long, short];

        let found = detect(&templates, &lines(&["a,b", "c,d", "1,2"])).unwrap();
        assert_eq!(found.type_name, "long");

        let found = detect(&templates, &lines(&["a,b", "1,2"])).unwrap();
        assert_eq!(found.type_name, "short");

        assert!(detect(&templates, &lines(&["x,y"])).is_none());
        assert!(detect(&templates, &[]).is_none());
    }

    #[test]
    fn test_read_template_dir_sorts_by_rows() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one_header.csv"), "a,b\n").unwrap();
        fs::write(dir.path().join("two_header.csv"), "a,b\nc,d\n").unwrap();
        fs::write(dir.path().join("ignored.csv"), "q\n").unwrap();

        let templates = read_template_dir(dir.path(), &ReadOptions::default()).unwrap();
        let names: Vec<_> = templates.iter().map(|t| t.type_name.as_str()).collect();
        assert_eq!(names, vec!["two", "one"]);
    }

    #[test]
    fn test_detect_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.csv");
        fs::write(&data, "a,b\nc,d\n1,2\n").unwrap();

        let templates = vec![template("two", &["a,b", "c,d"]).unwrap()];
        let found = detect_file(&templates, &data).unwrap();
        assert_eq!(found.map(|t| t.type_name.as_str()), Some("two"));
        assert!(detect_file(&[], &data).unwrap().is_none());
    }
}
