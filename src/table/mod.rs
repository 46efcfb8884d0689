//! Dynamic table rows
//!
//! Column sets come from the extraction result at runtime, so rows are ordered
//! maps from header to a tagged cell value rather than fixed structs.

mod extract;

pub use extract::{extract_table, Extraction, ExtractionResponse, TableExtractor};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell: either text or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Empty text cell
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Coerce to a number the way a spreadsheet would.
    ///
    /// Blank, non-numeric and non-finite values all become `0.0`.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(v) if v.is_finite() => *v,
            Self::Number(_) => 0.0,
            Self::Text(s) => parse_finite(s).unwrap_or(0.0),
        }
    }

    /// True for numeric cells
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// True for text cells that are empty or only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // -0.0 renders as "0"
            Self::Number(v) if *v == 0.0 => write!(f, "0"),
            Self::Number(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parse trimmed text as a finite float
pub(crate) fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One table row, keyed by header in column order
pub type TableRow = IndexMap<String, CellValue>;

/// A table of rows sharing one header set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column headers in display order
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a table from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<TableRow>) -> Self {
        Self { headers, rows }
    }

    /// Build a table whose headers are taken from the first row
    pub fn from_rows(rows: Vec<TableRow>) -> Self {
        let headers = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether a column exists
    pub fn has_header(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h == header)
    }

    /// Values of one column, `None` where a row lacks the cell
    pub fn column_values<'a>(&'a self, header: &'a str) -> impl Iterator<Item = Option<&'a CellValue>> + 'a {
        self.rows.iter().map(move |row| row.get(header))
    }

    /// Append a row with an empty cell for every header
    pub fn push_empty_row(&mut self) {
        let row = self
            .headers
            .iter()
            .map(|h| (h.clone(), CellValue::empty()))
            .collect();
        self.rows.push(row);
    }
}
