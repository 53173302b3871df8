//! Table transformations
//!
//! Each transformation mutates a [`Table`](crate::model::Table) in place and
//! leaves its header rows alone.

pub mod column;
pub mod fill;
pub mod group;
pub mod header;
pub mod predicate;
pub mod reorder;
pub mod sort;

pub use column::{add_columns, delete_columns, quote_column, replace_in_column};
pub use fill::{ColumnFill, FillSource};
pub use group::{active_groups, merge_exclusive, split_exclusive};
pub use header::{flatten_header, separator_index, truncate_at_separator};
pub use predicate::{Operator, RowPredicate};
pub use reorder::move_columns;
pub use sort::{KeyType, SortSpec};
