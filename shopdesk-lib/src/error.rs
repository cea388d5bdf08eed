use shopdesk_catalog::ParseEnumError;
use shopdesk_db::OperationError;
use thiserror::Error;

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A report argument did not name a known enum value
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ParseEnumError),

    /// A date argument was not in `dd-MM-yyyy` form
    #[error("Invalid date '{input}' (expected dd-MM-yyyy): {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },

    #[error("Database error: {0}")]
    Db(#[from] OperationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
