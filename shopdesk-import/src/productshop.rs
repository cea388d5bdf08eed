//! Import product-shop JSON documents.
//!
//! Each importer parses its document into DTOs, maps them onto entities and
//! inserts them in a single transaction. A malformed document or a foreign
//! key violation aborts the whole batch.

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use shopdesk_catalog::ProductShopDataset;
use shopdesk_catalog::productshop::{
    CategoryInput, CategoryProduct, CategoryProductInput, ProductInput, UserInput,
};
use shopdesk_db::operations;

use crate::ImportError;
use crate::progress::ImportProgress;

/// Counts from importing a full product-shop dataset.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub users: usize,
    pub products: usize,
    pub categories: usize,
    pub category_products: usize,
}

/// Import `users.json`.
pub fn import_users(conn: &Connection, input_json: &str) -> Result<String, ImportError> {
    let count = import_users_with(conn, input_json, None)?;
    Ok(imported_message(count))
}

/// Import `products.json`. Sellers and buyers must already exist.
pub fn import_products(conn: &Connection, input_json: &str) -> Result<String, ImportError> {
    let count = import_products_with(conn, input_json, None)?;
    Ok(imported_message(count))
}

/// Import `categories.json`, skipping entries without a name.
pub fn import_categories(conn: &Connection, input_json: &str) -> Result<String, ImportError> {
    let count = import_categories_with(conn, input_json, None)?;
    Ok(imported_message(count))
}

/// Import `categories-products.json`.
pub fn import_category_products(
    conn: &Connection,
    input_json: &str,
) -> Result<String, ImportError> {
    let count = import_category_products_with(conn, input_json, None)?;
    Ok(imported_message(count))
}

/// Import all four documents in dependency order.
pub fn import_dataset(
    conn: &Connection,
    dataset: &ProductShopDataset,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let run = |label: &str, json: &str, import: ImportFn| -> Result<usize, ImportError> {
        if let Some(p) = progress {
            p.on_phase(&format!("Importing {label}"));
        }
        let count = import(conn, json, progress)?;
        if let Some(p) = progress {
            p.on_complete(&imported_message(count));
        }
        Ok(count)
    };

    Ok(ImportStats {
        users: run("users", &dataset.users, import_users_with)?,
        products: run("products", &dataset.products, import_products_with)?,
        categories: run("categories", &dataset.categories, import_categories_with)?,
        category_products: run(
            "category products",
            &dataset.category_products,
            import_category_products_with,
        )?,
    })
}

type ImportFn = fn(&Connection, &str, Option<&dyn ImportProgress>) -> Result<usize, ImportError>;

fn imported_message(count: usize) -> String {
    format!("Successfully imported {count}")
}

fn import_users_with(
    conn: &Connection,
    input_json: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<usize, ImportError> {
    let inputs: Vec<UserInput> = parse_document("users", input_json)?;
    insert_all(conn, inputs, progress, |tx, input| {
        let name = input.last_name.clone();
        operations::insert_user(tx, &input.into_user())?;
        Ok(name)
    })
}

fn import_products_with(
    conn: &Connection,
    input_json: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<usize, ImportError> {
    let inputs: Vec<ProductInput> = parse_document("products", input_json)?;
    insert_all(conn, inputs, progress, |tx, input| {
        let name = input.name.clone();
        operations::insert_product(tx, &input.into_product())?;
        Ok(name)
    })
}

fn import_categories_with(
    conn: &Connection,
    input_json: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<usize, ImportError> {
    let inputs: Vec<CategoryInput> = parse_document("categories", input_json)?;
    let total = inputs.len();
    let categories: Vec<_> = inputs
        .into_iter()
        .filter_map(CategoryInput::into_category)
        .collect();
    if categories.len() < total {
        log::debug!(
            "skipped {} categories without a name",
            total - categories.len()
        );
    }
    insert_all(conn, categories, progress, |tx, category| {
        operations::insert_product_category(tx, &category.name)?;
        Ok(category.name)
    })
}

fn import_category_products_with(
    conn: &Connection,
    input_json: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<usize, ImportError> {
    let inputs: Vec<CategoryProductInput> = parse_document("category products", input_json)?;
    insert_all(conn, inputs, progress, |tx, input| {
        let link = CategoryProduct::from(input);
        operations::insert_category_product(tx, &link)?;
        Ok(format!("{}:{}", link.category_id, link.product_id))
    })
}

fn parse_document<T: DeserializeOwned>(
    document: &'static str,
    input_json: &str,
) -> Result<Vec<T>, ImportError> {
    serde_json::from_str(input_json).map_err(|source| ImportError::Json { document, source })
}

/// Insert every item inside one transaction. `insert` returns a label used
/// for progress output.
fn insert_all<T>(
    conn: &Connection,
    items: Vec<T>,
    progress: Option<&dyn ImportProgress>,
    mut insert: impl FnMut(&Connection, T) -> Result<String, ImportError>,
) -> Result<usize, ImportError> {
    let total = items.len();
    let tx = conn.unchecked_transaction()?;
    let tx_conn: &Connection = &tx;

    for (i, item) in items.into_iter().enumerate() {
        let label = insert(tx_conn, item)?;
        if let Some(p) = progress {
            p.on_record(i + 1, total, &label);
        }
    }

    tx.commit()?;
    Ok(total)
}
