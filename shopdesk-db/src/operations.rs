//! Write operations: inserts for every entity type plus the two bulk
//! bookshop mutations.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use shopdesk_catalog::Money;
use shopdesk_catalog::bookshop::Book;
use shopdesk_catalog::productshop::{CategoryProduct, Product, User};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Invalid stored value in {column}: {message}")]
    InvalidValue { column: String, message: String },
}

// ── Bookshop ────────────────────────────────────────────────────────────────

/// Insert an author. Returns the new `author_id`.
pub fn insert_author(
    conn: &Connection,
    first_name: Option<&str>,
    last_name: &str,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO authors (first_name, last_name) VALUES (?1, ?2)",
        params![first_name, last_name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a bookshop category. Returns the new `category_id`.
pub fn insert_category(conn: &Connection, name: &str) -> Result<i64, OperationError> {
    conn.execute("INSERT INTO categories (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// Insert a book. `book.book_id` is ignored; returns the new id.
pub fn insert_book(conn: &Connection, book: &Book) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO books (title, description, release_date, copies, price_cents,
             edition_type, age_restriction, author_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            book.title,
            book.description,
            book.release_date,
            book.copies,
            book.price.cents(),
            book.edition_type.as_str(),
            book.age_restriction.as_str(),
            book.author_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Link a book to a category.
pub fn link_book_category(
    conn: &Connection,
    book_id: i64,
    category_id: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO books_categories (book_id, category_id) VALUES (?1, ?2)",
        params![book_id, category_id],
    )?;
    Ok(())
}

/// Add `amount` to the price of every book released before January 1st of
/// `year`. Books without a release date are left alone.
///
/// Returns the number of books updated.
pub fn increase_prices_released_before(
    conn: &Connection,
    year: i32,
    amount: Money,
) -> Result<usize, OperationError> {
    let cutoff = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| OperationError::InvalidValue {
        column: "release_date".to_string(),
        message: format!("year {year} is out of range"),
    })?;
    let changed = conn.execute(
        "UPDATE books SET price_cents = price_cents + ?2
         WHERE release_date IS NOT NULL AND release_date < ?1",
        params![cutoff, amount.cents()],
    )?;
    log::debug!("increased price of {changed} books released before {year} by {amount}");
    Ok(changed)
}

/// Delete every book with fewer than `copies` copies. Category links go with
/// them (`ON DELETE CASCADE`).
///
/// Returns the number of books removed.
pub fn remove_books_with_copies_below(
    conn: &Connection,
    copies: i64,
) -> Result<usize, OperationError> {
    let removed = conn.execute("DELETE FROM books WHERE copies < ?1", params![copies])?;
    log::debug!("removed {removed} books with fewer than {copies} copies");
    Ok(removed)
}

/// Current price of a book.
pub fn book_price(conn: &Connection, book_id: i64) -> Result<Money, OperationError> {
    let cents: Option<i64> = conn
        .query_row(
            "SELECT price_cents FROM books WHERE book_id = ?1",
            params![book_id],
            |row| row.get(0),
        )
        .optional()?;
    cents.map(Money::from_cents).ok_or_else(|| OperationError::NotFound {
        entity_type: "book".to_string(),
        id: book_id.to_string(),
    })
}

// ── Product shop ────────────────────────────────────────────────────────────

/// Insert a user. `user.id` is ignored; returns the new id.
pub fn insert_user(conn: &Connection, user: &User) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO users (first_name, last_name, age) VALUES (?1, ?2, ?3)",
        params![user.first_name, user.last_name, user.age],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a product. `product.id` is ignored; returns the new id.
pub fn insert_product(conn: &Connection, product: &Product) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO products (name, price_cents, seller_id, buyer_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            product.name,
            product.price.cents(),
            product.seller_id,
            product.buyer_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a product category. Returns the new id.
pub fn insert_product_category(conn: &Connection, name: &str) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO product_categories (name) VALUES (?1)",
        params![name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Place a product in a category.
pub fn insert_category_product(
    conn: &Connection,
    link: &CategoryProduct,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO category_products (category_id, product_id) VALUES (?1, ?2)",
        params![link.category_id, link.product_id],
    )?;
    Ok(())
}
