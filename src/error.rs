//! Error types for load case generation

use thiserror::Error;

/// Main error type for load case operations
#[derive(Error, Debug)]
pub enum LoadGenError {
    #[error("Calculation error: OLF value cannot be zero for load case \"{0}\". Please correct the value in the Overload Factors table.")]
    ZeroOverloadFactor(String),

    #[error("No valid load case data found. Please check your column mapping.")]
    NoLoadCases,

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Row {0} is out of range")]
    RowOutOfRange(usize),

    #[error("Column '{0}' not found")]
    UnknownColumn(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

/// Result type for load case operations
pub type LoadGenResult<T> = Result<T, LoadGenError>;
