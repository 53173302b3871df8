//! Stable multi-key sort with typed key columns

use std::cmp::Ordering;

use crate::error::{Result, TableError};
use crate::model::{Row, Table};

/// How a key column is compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyType {
    #[default]
    Str,
    Int,
    Float,
}

impl std::str::FromStr for KeyType {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "str" => Ok(KeyType::Str),
            "int" => Ok(KeyType::Int),
            "float" => Ok(KeyType::Float),
            other => Err(TableError::UnknownKeyType(other.to_string())),
        }
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Str => write!(f, "str"),
            KeyType::Int => write!(f, "int"),
            KeyType::Float => write!(f, "float"),
        }
    }
}

/// Decimal integer of any width: sign plus digits without leading zeros
#[derive(Debug, Clone, PartialEq, Eq)]
struct Integer {
    negative: bool,
    digits: String,
}

impl Integer {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, body) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = body.trim_start_matches('0');
        Some(Self {
            // -0 is 0
            negative: negative && !digits.is_empty(),
            digits: digits.to_string(),
        })
    }

    fn magnitude_cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.magnitude_cmp(other),
            (true, true) => other.magnitude_cmp(self),
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One converted key cell
#[derive(Debug, Clone, PartialEq)]
enum KeyValue {
    Str(String),
    Int(Integer),
    Float(f64),
}

impl KeyValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyValue::Str(a), KeyValue::Str(b)) => a.cmp(b),
            (KeyValue::Int(a), KeyValue::Int(b)) => a.cmp(b),
            // NaN sorts after every number; -0.0 ties with 0.0
            (KeyValue::Float(a), KeyValue::Float(b)) if a == b => Ordering::Equal,
            (KeyValue::Float(a), KeyValue::Float(b)) => a.total_cmp(b),
            // a key position always holds one type
            _ => Ordering::Equal,
        }
    }
}

/// Key columns with their types, in priority order
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    keys: Vec<(usize, KeyType)>,
    reverse: bool,
}

impl SortSpec {
    /// Pair key columns with their types
    pub fn new(columns: &[usize], types: &[KeyType]) -> Result<Self> {
        if columns.len() != types.len() {
            return Err(TableError::KeyTypeCountMismatch {
                keys: columns.len(),
                types: types.len(),
            });
        }
        Ok(Self {
            keys: columns.iter().copied().zip(types.iter().copied()).collect(),
            reverse: false,
        })
    }

    /// Compare every key as text
    pub fn strings(columns: &[usize]) -> Self {
        Self {
            keys: columns.iter().map(|&c| (c, KeyType::Str)).collect(),
            reverse: false,
        }
    }

    /// Parse type tags such as `["str", "int"]`, rejecting unknown tags up front
    pub fn with_type_names(columns: &[usize], names: &[String]) -> Result<Self> {
        let types = names
            .iter()
            .map(|n| n.parse::<KeyType>())
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns, &types)
    }

    /// Sort descending on the whole composite key
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    fn composite_key(&self, row: &Row, row_index: usize) -> Result<Vec<KeyValue>> {
        self.keys
            .iter()
            .map(|&(column, key_type)| {
                let text = row.cell(column);
                let parse_error = || TableError::KeyParse {
                    row: row_index,
                    column,
                    value: text.to_string(),
                    key_type: key_type.to_string(),
                };
                match key_type {
                    KeyType::Str => Ok(KeyValue::Str(text.to_string())),
                    KeyType::Int => Integer::parse(text)
                        .map(KeyValue::Int)
                        .ok_or_else(parse_error),
                    KeyType::Float => text
                        .trim()
                        .parse::<f64>()
                        .map(KeyValue::Float)
                        .map_err(|_| parse_error()),
                }
            })
            .collect()
    }

    /// Reorder the data rows.
    ///
    /// Every key is converted before any row moves, so a parse failure leaves
    /// the table as it was. Rows with equal keys keep their relative order in
    /// both directions.
    pub fn apply(&self, table: &mut Table) -> Result<()> {
        let keys = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.composite_key(row, i))
            .collect::<Result<Vec<_>>>()?;

        let rows = std::mem::take(&mut table.rows);
        let mut keyed: Vec<(Vec<KeyValue>, Row)> = keys.into_iter().zip(rows).collect();
        keyed.sort_by(|(a, _), (b, _)| {
            let ord = compare_keys(a, b);
            if self.reverse {
                ord.reverse()
            } else {
                ord
            }
        });
        table.rows = keyed.into_iter().map(|(_, row)| row).collect();

        tracing::debug!(
            "Sorted {} rows on {} keys",
            table.row_count(),
            self.keys.len()
        );
        Ok(())
    }
}

fn compare_keys(a: &[KeyValue], b: &[KeyValue]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.compare(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}
