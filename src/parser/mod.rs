//! Parser layer: line tokenizing and table reading

mod csv;
mod tokenizer;

pub use self::csv::{
    read_file_lines, read_lines, read_table, read_table_from, read_table_with_template,
};
pub use self::tokenizer::split_fields;
