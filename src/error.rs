//! Error types for table transformations.
//!
//! Configuration errors are raised before any row is touched. Data errors carry
//! the row and column that failed so the caller can point at the input.

use thiserror::Error;

/// Errors raised while reading, transforming, or writing a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// `--from` and `--to` lists of a column move differ in length.
    #[error("Column move needs as many destinations as sources: {from} from, {to} to")]
    MoveCountMismatch { from: usize, to: usize },

    /// Sort key columns and key types differ in length.
    #[error("Sort needs one type per key column: {keys} keys, {types} types")]
    KeyTypeCountMismatch { keys: usize, types: usize },

    /// Sort type tag other than `str`, `int`, `float`.
    #[error("Unknown sort key type: {0}")]
    UnknownKeyType(String),

    /// Row predicate uses an operator other than `==` or `!=`.
    #[error("Unsupported operator '{operator}' in row condition: {condition}")]
    UnsupportedOperator { operator: String, condition: String },

    /// Row predicate does not match `<index><operator><literal>`.
    #[error("Malformed row condition: {0}")]
    MalformedPredicate(String),

    /// Unknown fill source or a fill value that does not fit its source.
    #[error("Invalid fill source: {0}")]
    InvalidFillSource(String),

    /// A sort key cell could not be converted to its declared type.
    #[error("Row {row}, column {column}: cannot parse '{value}' as {key_type}")]
    KeyParse {
        row: usize,
        column: usize,
        value: String,
        key_type: String,
    },

    /// A column value vector does not have one value per data row.
    #[error("Column has {found} values but the table has {expected} rows")]
    ColumnLengthMismatch { expected: usize, found: usize },

    /// Header rows read from a file differ from the expected template.
    #[error("Header rows do not match template '{0}'")]
    HeaderMismatch(String),

    /// Template column count differs from the table's column count.
    #[error("Template '{name}' has {expected} columns but the table has {found}")]
    HeaderColumnCount {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Template file cannot be used as a header template.
    #[error("Invalid header template: {0}")]
    InvalidTemplate(String),

    /// Underlying stream failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
