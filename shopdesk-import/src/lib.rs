//! Load fixture data into the shop database.
//!
//! This crate owns the ETL logic: parsing JSON documents into DTOs, mapping
//! them onto catalog entities, and inserting them transactionally.

pub mod bookshop;
pub mod productshop;
pub mod progress;

use shopdesk_db::{OperationError, SchemaError};
use thiserror::Error;

pub use bookshop::{SeedStats, reset_database};
pub use productshop::{
    ImportStats, import_categories, import_category_products, import_dataset, import_products,
    import_users,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid {document} JSON: {source}")]
    Json {
        document: &'static str,
        source: serde_json::Error,
    },
    #[error("Seed references unknown {entity} #{position}")]
    UnknownReference { entity: &'static str, position: i64 },
}
