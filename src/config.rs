//! Configuration handling for csvprep

use std::str::FromStr;

/// Options controlling how text lines become a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter
    pub delimiter: char,
    /// Trim leading/trailing whitespace of every field
    pub trim: bool,
    /// Number of leading lines kept as header rows
    pub header_rows: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim: false,
            header_rows: 0,
        }
    }
}

impl ReadOptions {
    /// Create options with the default delimiter and no header rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enable field trimming
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set the number of header rows
    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }
}

/// Strip the enclosing `[` `]` of a list argument and split its items.
fn bracketed_items(s: &str) -> Result<Vec<&str>, String> {
    let inner = s
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| format!("List must be written as \"[value[,...]]\": {}", s))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(inner.split(',').map(str::trim).collect())
}

/// Column indices written as `[index[,...]]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexList(pub Vec<usize>);

impl FromStr for IndexList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        bracketed_items(s)?
            .into_iter()
            .map(|item| {
                item.parse::<usize>()
                    .map_err(|_| format!("Invalid column index: {}", item))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(IndexList)
    }
}

impl IndexList {
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

/// Where a new column goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPosition {
    /// Before the column currently at this index
    At(usize),
    /// After the last column
    End,
}

impl FromStr for ColumnPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-1" => Ok(ColumnPosition::End),
            other => other
                .parse::<usize>()
                .map(ColumnPosition::At)
                .map_err(|_| format!("Invalid column position: {}", s)),
        }
    }
}

/// Column positions written as `[index[,...]]`, where `-1` means the end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionList(pub Vec<ColumnPosition>);

impl FromStr for PositionList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        bracketed_items(s)?
            .into_iter()
            .map(ColumnPosition::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(PositionList)
    }
}

impl PositionList {
    pub fn into_inner(self) -> Vec<ColumnPosition> {
        self.0
    }
}

/// Raw values written as `[value[,...]]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueList(pub Vec<String>);

impl FromStr for ValueList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ValueList(
            bracketed_items(s)?.into_iter().map(String::from).collect(),
        ))
    }
}

impl ValueList {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
