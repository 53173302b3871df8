//! Data model for delimited text tables

mod table;
pub mod template;

pub use table::{Row, Table};
pub use template::HeaderTemplate;
