//! Shop data model types, import DTOs, and JSON fixture loading.
//!
//! This crate defines the bookshop and product-shop entities without any
//! database dependencies. `shopdesk-db` persists them and `shopdesk-import`
//! maps fixture DTOs onto them.

pub mod bookshop;
pub mod fixtures;
pub mod money;
pub mod productshop;

pub use bookshop::{AgeRestriction, EditionType, ParseEnumError, full_name};
pub use fixtures::{BookShopSeed, FixtureError, ProductShopDataset, load_json_file};
pub use money::Money;
