//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used by the dataset collaborators and the CLI.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - The deadline engine itself has no error type: an unparseable deadline
//!   is a value (`Unresolved`), never an error.
//! - Loading errors carry the offending path or column so a user can fix
//!   the source spreadsheet.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the Packaging Compliance Tool.
#[derive(Error, Debug)]
pub enum PctError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be opened or a sheet could not be read.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// CSV reading or writing failed.
    #[error("csv error: {0}")]
    Csv(String),

    /// The dataset file has an extension no reader handles.
    #[error("unsupported dataset format {extension:?} for {}", path.display())]
    UnsupportedFormat {
        /// Path of the rejected file.
        path: PathBuf,
        /// The extension that was not recognised (empty if none).
        extension: String,
    },

    /// A required column is absent from the dataset header.
    #[error("required column {0:?} is missing from the dataset")]
    MissingColumn(String),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A user-supplied value (category label, date, option) was rejected.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_names_the_column() {
        let err = PctError::MissingColumn("Deadline".to_string());
        assert_eq!(
            err.to_string(),
            "required column \"Deadline\" is missing from the dataset"
        );
    }

    #[test]
    fn unsupported_format_names_the_path() {
        let err = PctError::UnsupportedFormat {
            path: PathBuf::from("data/table.pdf"),
            extension: "pdf".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"pdf\""));
        assert!(msg.contains("data/table.pdf"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PctError = io.into();
        assert!(matches!(err, PctError::Io(_)));
    }
}
