use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A value extracted from a row by a column accessor.
///
/// Accessors return `Option<CellValue>`; `None` means the field is missing or
/// extraction failed, and degrades to a non-matching filter value and a
/// maximal sort value rather than an error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum CellValue {
    /// Display/filter text
    Text(String),
    /// Numeric value (scores, amounts, counts)
    Number(f64),
    /// Boolean flag
    Bool(bool),
}

impl CellValue {
    /// Create a text value from anything string-like
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Rank used when comparing values of different variants:
    /// numbers sort before text, text before booleans.
    fn type_rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Text(_) => 1,
            Self::Bool(_) => 2,
        }
    }

    /// Total order over same- and mixed-variant values.
    ///
    /// Numbers use `f64::total_cmp`, text compares case-insensitively,
    /// mixed variants order by [`type_rank`](Self::type_rank).
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}
