//! Report rendering for both shops, plus the shared settings file.
//!
//! The bookshop reports are line-oriented text; the product-shop reports are
//! pretty-printed JSON. Every report takes an open connection and reads the
//! current state of the database.

pub mod bookshop;
pub mod error;
pub mod productshop;
pub mod settings;

pub use error::ReportError;
pub use productshop::{PRODUCTSHOP_REPORTS, ReportFn, export_all};
pub use settings::{DatasetDirs, Settings};
