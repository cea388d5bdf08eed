pub(crate) mod bookshop;
pub(crate) mod productshop;
pub(crate) mod run_all;
pub(crate) mod stats;

use std::path::PathBuf;

use rusqlite::Connection;
use shopdesk_lib::DatasetDirs;

use crate::CliError;

/// Resolved locations shared by every command.
pub(crate) struct Context {
    pub db_path: PathBuf,
    pub datasets: DatasetDirs,
}

impl Context {
    /// Open (creating if needed) the shop database.
    pub(crate) fn open_db(&self) -> Result<Connection, CliError> {
        shopdesk_db::open_database(&self.db_path).map_err(|e| {
            CliError::database(format!(
                "Failed to open database at {}: {}",
                self.db_path.display(),
                e
            ))
        })
    }
}

/// Print a text or JSON report to stdout. Empty reports print nothing.
pub(crate) fn print_report(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}
