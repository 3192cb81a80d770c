//! Codec error types

use thiserror::Error;

/// Result type for reading and writing workbooks
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while reading or writing workbooks
#[derive(Debug, Error)]
pub enum CodecError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The workbook could not be opened or a sheet could not be decoded
    #[error("Cannot read workbook: {0}")]
    Workbook(String),

    /// Requested sheet is not in the workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] valve_sheets_core::Error),
}

impl From<calamine::Error> for CodecError {
    fn from(err: calamine::Error) -> Self {
        CodecError::Workbook(err.to_string())
    }
}
