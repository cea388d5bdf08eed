//! JSON fixture loading for both datasets.
//!
//! Expected layout:
//! ```text
//! datasets/
//!   bookshop/
//!     authors.json
//!     categories.json
//!     books.json
//!   productshop/
//!     users.json
//!     products.json
//!     categories.json
//!     categories-products.json
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::bookshop::{AuthorSeed, BookSeed, CategorySeed};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// Parsed bookshop seed data.
#[derive(Debug, Clone, Default)]
pub struct BookShopSeed {
    pub authors: Vec<AuthorSeed>,
    pub categories: Vec<CategorySeed>,
    pub books: Vec<BookSeed>,
}

impl BookShopSeed {
    /// Load `authors.json`, `categories.json` and `books.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, FixtureError> {
        ensure_dir(dir)?;
        Ok(Self {
            authors: load_json_file(&dir.join("authors.json"))?,
            categories: load_json_file(&dir.join("categories.json"))?,
            books: load_json_file(&dir.join("books.json"))?,
        })
    }
}

/// Raw product-shop JSON documents, handed to the importers unparsed.
#[derive(Debug, Clone, Default)]
pub struct ProductShopDataset {
    pub users: String,
    pub products: String,
    pub categories: String,
    pub category_products: String,
}

impl ProductShopDataset {
    pub fn load(dir: &Path) -> Result<Self, FixtureError> {
        ensure_dir(dir)?;
        Ok(Self {
            users: read_text(&dir.join("users.json"))?,
            products: read_text(&dir.join("products.json"))?,
            categories: read_text(&dir.join("categories.json"))?,
            category_products: read_text(&dir.join("categories-products.json"))?,
        })
    }
}

/// Read and deserialize a JSON file.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let contents = read_text(path)?;
    serde_json::from_str(&contents).map_err(|e| FixtureError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn read_text(path: &Path) -> Result<String, FixtureError> {
    std::fs::read_to_string(path).map_err(|e| FixtureError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn ensure_dir(dir: &Path) -> Result<(), FixtureError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(FixtureError::DirNotFound(dir.display().to_string()))
    }
}
