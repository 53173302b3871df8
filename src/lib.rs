//! csvprep - Preprocessing toolkit for delimited text tables
//!
//! Reads CSV-like text into an in-memory [`Table`] and rewrites it: batch column
//! moves, splitting mutually exclusive column groups into separate rows and
//! merging them back, gap filling, and typed multi-key sorting.
//!
//! Fields keep their quoting exactly as read, so a table written back out
//! reproduces every untouched cell byte for byte.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod transform;

pub use config::ReadOptions;
pub use error::{Result, TableError};
pub use model::{HeaderTemplate, Row, Table};
