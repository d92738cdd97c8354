//! Errors raised while compiling, fetching and writing an export.
//!
//! A selection that does not match the catalog is not an error: it is
//! dropped by the projection builder. Every variant here aborts the export
//! and no output is written.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// None of the selected columns exist in the catalog.
    #[error("no exportable columns selected")]
    NoColumns,

    /// Statement preparation or stepping failed.
    #[error("export query failed: {0}")]
    QueryExecution(#[from] rusqlite::Error),

    /// A precondition that normal use cannot break was broken.
    #[error("export invariant violated: {0}")]
    InvariantViolation(String),

    /// The output could not be rendered or written.
    #[error("failed to write export: {0}")]
    Serialization(String),
}

impl From<csv::Error> for ExportError {
    fn from(error: csv::Error) -> Self {
        ExportError::Serialization(error.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(error: std::io::Error) -> Self {
        ExportError::Serialization(error.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Serialization(error.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ExportError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        ExportError::Serialization(error.to_string())
    }
}
