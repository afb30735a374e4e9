/// Error Module
///
/// This module defines the error type shared by the decoder, the exporters
/// and the SQLite adapter.
use thiserror::Error;

/// Error type for sqlrecords.
///
/// The first three variants belong to the record pipeline itself:
/// - `Decode` when a row's values do not line up with its columns
/// - `Serialization` when a value cannot be written as JSON
/// - `EmptyBatchHeader` when a CSV header is requested from an empty batch
///
/// The remaining variants come from the database adapter, configuration
/// loading and the command line front end.
#[derive(Error, Debug)]
pub enum RecordsError {
    /// Column/value count mismatch while decoding one row
    #[error("Decode error: {columns} columns but {values} values")]
    Decode { columns: usize, values: usize },

    /// A value could not be represented in the export format
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A header row was requested from a batch with no records
    #[error("Cannot take a CSV header from an empty batch")]
    EmptyBatchHeader,

    /// CSV text encoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Database-related errors from SQLite operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// SQL query errors (syntax, execution, missing tables, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown export format name
    #[error("Unsupported export format: '{0}'. Supported formats: json, csv, maps, slices")]
    UnsupportedFormat(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use RecordsError as the error type.
pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let decode_err = RecordsError::Decode { columns: 2, values: 3 };
        assert_eq!(decode_err.to_string(), "Decode error: 2 columns but 3 values");

        let db_err = RecordsError::Database(rusqlite::Error::ExecuteReturnedResults);
        assert!(db_err.to_string().contains("Database error"));

        let format_err = RecordsError::UnsupportedFormat("xml".to_string());
        assert!(format_err.to_string().contains("'xml'"));

        assert!(RecordsError::EmptyBatchHeader.to_string().contains("empty batch"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RecordsError = io_err.into();
        match err {
            RecordsError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }

        let json_err: std::result::Result<serde_json::Value, serde_json::Error> =
            serde_json::from_str("{ invalid json }");
        let err: RecordsError = json_err.unwrap_err().into();
        match err {
            RecordsError::Serialization(_) => {}
            _ => panic!("Expected serialization error"),
        }
    }
}
