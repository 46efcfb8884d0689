//! Extraction collaborator interface
//!
//! The image-to-table service is external. This module defines the seam it
//! plugs into and turns its `{headers, rows}` response into a [`Table`].

use serde::{Deserialize, Serialize};

use super::{parse_finite, CellValue, Table, TableRow};
use crate::error::{LoadGenError, LoadGenResult};

/// Anything that can turn image bytes into a raw extraction response
pub trait TableExtractor {
    fn extract(&self, image: &[u8], mime_type: &str) -> LoadGenResult<ExtractionResponse>;
}

/// Raw response shape returned by the extraction service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Outcome of an extraction
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// A table was found
    Table(Table),
    /// The image contained no table. Not an error.
    NoTable,
}

impl ExtractionResponse {
    /// Parse a JSON response body
    pub fn from_json(body: &str) -> LoadGenResult<Self> {
        serde_json::from_str(body.trim()).map_err(|e| {
            log::error!("extraction response is not in the expected format: {}", e);
            LoadGenError::Extraction(
                "Could not parse table data from the image. The response format was incorrect."
                    .to_string(),
            )
        })
    }

    /// Coerce the string cells and build a table
    pub fn into_extraction(self) -> Extraction {
        if self.headers.is_empty() || self.rows.is_empty() {
            return Extraction::NoTable;
        }

        let rows = self
            .rows
            .iter()
            .map(|cells| {
                self.headers
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        let cell = cells.get(i).and_then(|c| c.as_deref());
                        (header.clone(), coerce_cell(cell))
                    })
                    .collect::<TableRow>()
            })
            .collect();

        Extraction::Table(Table::new(self.headers, rows))
    }
}

/// Missing or blank cells become empty text, finite numbers become numeric
fn coerce_cell(cell: Option<&str>) -> CellValue {
    match cell {
        None => CellValue::empty(),
        Some(raw) if raw.trim().is_empty() => CellValue::empty(),
        Some(raw) => match parse_finite(raw) {
            Some(v) => CellValue::Number(v),
            None => CellValue::text(raw),
        },
    }
}

/// Run an extractor and convert its response
pub fn extract_table<E: TableExtractor + ?Sized>(
    extractor: &E,
    image: &[u8],
    mime_type: &str,
) -> LoadGenResult<Extraction> {
    let response = extractor.extract(image, mime_type)?;
    let extraction = response.into_extraction();
    match &extraction {
        Extraction::Table(table) => log::debug!(
            "extracted {} rows x {} columns",
            table.rows.len(),
            table.headers.len()
        ),
        Extraction::NoTable => log::debug!("no table found in image"),
    }
    Ok(extraction)
}
