//! Row conditions of the form `<columnIndex><operator><literal>`

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TableError};
use crate::model::Row;

/// Comparison operator of a row condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equal => write!(f, "=="),
            Operator::NotEqual => write!(f, "!="),
        }
    }
}

/// A parsed row condition comparing one cell to a literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPredicate {
    pub column: usize,
    pub operator: Operator,
    pub literal: String,
}

impl RowPredicate {
    /// Evaluate against a row; a missing cell reads as blank
    pub fn matches(&self, row: &Row) -> bool {
        let cell = row.cell(self.column);
        match self.operator {
            Operator::Equal => cell == self.literal,
            Operator::NotEqual => cell != self.literal,
        }
    }
}

impl FromStr for RowPredicate {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(TableError::MalformedPredicate(s.to_string()));
        }
        let column = s[..digits]
            .parse::<usize>()
            .map_err(|_| TableError::MalformedPredicate(s.to_string()))?;

        // operator token: one of `! = < >`, optionally followed by `=`
        let rest = &s[digits..];
        let mut op_len = match rest.chars().next() {
            Some('!' | '=' | '<' | '>') => 1,
            _ => return Err(TableError::MalformedPredicate(s.to_string())),
        };
        if rest[op_len..].starts_with('=') {
            op_len += 1;
        }

        let operator = match &rest[..op_len] {
            "==" => Operator::Equal,
            "!=" => Operator::NotEqual,
            other => {
                return Err(TableError::UnsupportedOperator {
                    operator: other.to_string(),
                    condition: s.to_string(),
                })
            }
        };

        Ok(Self {
            column,
            operator,
            literal: unquote(&rest[op_len..]).to_string(),
        })
    }
}

/// Strip one pair of matching `"` or `'` quotes
fn unquote(literal: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = literal
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    literal
}
