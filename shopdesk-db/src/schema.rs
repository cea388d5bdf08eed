//! SQLite schema creation, versioning and resets.

use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported schema: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent, safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(VERSION_SQL)?;
    conn.execute_batch(BOOKSHOP_SQL)?;
    conn.execute_batch(PRODUCTSHOP_SQL)?;
    if get_schema_version(conn)? < CURRENT_VERSION {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a shop database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    register_functions(&conn)?;

    let version = get_schema_version(&conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }
    create_schema(&conn)?;
    log::debug!("opened shop database {} (schema v{version})", path.display());

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    register_functions(&conn)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Install the SQL functions the queries rely on.
///
/// `unicode_lower(text)` lowercases with full Unicode case mapping; the
/// built-in `LOWER()` only folds ASCII letters. NULL stays NULL.
pub fn register_functions(conn: &Connection) -> Result<(), SchemaError> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|s| s.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Drop and recreate the bookshop tables, discarding their rows.
pub fn reset_bookshop(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS books_categories;
         DROP TABLE IF EXISTS books;
         DROP TABLE IF EXISTS categories;
         DROP TABLE IF EXISTS authors;",
    )?;
    conn.execute_batch(BOOKSHOP_SQL)?;
    Ok(())
}

/// Drop and recreate the product-shop tables, discarding their rows.
pub fn reset_productshop(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS category_products;
         DROP TABLE IF EXISTS product_categories;
         DROP TABLE IF EXISTS products;
         DROP TABLE IF EXISTS users;",
    )?;
    conn.execute_batch(PRODUCTSHOP_SQL)?;
    Ok(())
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

const VERSION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

const BOOKSHOP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    author_id INTEGER PRIMARY KEY,
    first_name TEXT,
    last_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    category_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Prices are whole cents; release_date is an ISO date (YYYY-MM-DD).
CREATE TABLE IF NOT EXISTS books (
    book_id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    release_date TEXT,
    copies INTEGER NOT NULL,
    price_cents INTEGER NOT NULL,
    edition_type TEXT NOT NULL CHECK (edition_type IN ('Normal', 'Promo', 'Gold')),
    age_restriction TEXT NOT NULL CHECK (age_restriction IN ('Minor', 'Teen', 'Adult')),
    author_id INTEGER NOT NULL REFERENCES authors(author_id)
);
CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id);
CREATE INDEX IF NOT EXISTS idx_books_release ON books(release_date);

CREATE TABLE IF NOT EXISTS books_categories (
    book_id INTEGER NOT NULL REFERENCES books(book_id) ON DELETE CASCADE,
    category_id INTEGER NOT NULL REFERENCES categories(category_id) ON DELETE CASCADE,
    PRIMARY KEY (book_id, category_id)
);
CREATE INDEX IF NOT EXISTS idx_books_categories_category ON books_categories(category_id);
"#;

const PRODUCTSHOP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    first_name TEXT,
    last_name TEXT NOT NULL,
    age INTEGER
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    price_cents INTEGER NOT NULL,
    seller_id INTEGER NOT NULL REFERENCES users(id),
    buyer_id INTEGER REFERENCES users(id)
);
CREATE INDEX IF NOT EXISTS idx_products_seller ON products(seller_id);
CREATE INDEX IF NOT EXISTS idx_products_buyer ON products(buyer_id);

CREATE TABLE IF NOT EXISTS product_categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS category_products (
    category_id INTEGER NOT NULL REFERENCES product_categories(id),
    product_id INTEGER NOT NULL REFERENCES products(id),
    PRIMARY KEY (category_id, product_id)
);
"#;
