use shopdesk_lib::ReportError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// Fixture directory or file could not be loaded
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// Import or reseed failed
    #[error("Import error: {0}")]
    Import(String),

    /// A report failed, usually because of a bad argument
    #[error("Report error: {0}")]
    Report(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn fixture(msg: impl Into<String>) -> Self {
        Self::Fixture(msg.into())
    }

    pub(crate) fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }
}

impl From<ReportError> for CliError {
    fn from(e: ReportError) -> Self {
        Self::Report(e.to_string())
    }
}
