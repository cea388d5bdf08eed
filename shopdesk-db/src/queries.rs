//! Read queries for both shops.
//!
//! Each query is parameterised on its thresholds and returns typed rows; the
//! report layer owns the fixed constants and the rendering.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, params, params_from_iter};
use shopdesk_catalog::bookshop::{AgeRestriction, Author, Book, EditionType};
use shopdesk_catalog::productshop::User;
use shopdesk_catalog::{Money, full_name};

use crate::operations::OperationError;

// ── Bookshop: title lists ───────────────────────────────────────────────────

/// Titles of books with the given age restriction, ordered by title.
pub fn titles_by_age_restriction(
    conn: &Connection,
    restriction: AgeRestriction,
) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT title FROM books WHERE age_restriction = ?1 ORDER BY title, book_id",
    )?;
    let rows = stmt.query_map(params![restriction.as_str()], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Titles of books of one edition with fewer than `max_copies` copies,
/// ordered by book id.
pub fn titles_by_edition_below_copies(
    conn: &Connection,
    edition: EditionType,
    max_copies: i64,
) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT title FROM books WHERE edition_type = ?1 AND copies < ?2 ORDER BY book_id",
    )?;
    let rows = stmt.query_map(params![edition.as_str(), max_copies], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Titles of dated books released in any year but `year`, ordered by book id.
pub fn titles_not_released_in(conn: &Connection, year: i32) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT title FROM books
         WHERE release_date IS NOT NULL
           AND CAST(strftime('%Y', release_date) AS INTEGER) <> ?1
         ORDER BY book_id",
    )?;
    let rows = stmt.query_map(params![year], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Titles of books in at least one of `categories` (names compared
/// case-insensitively over all of Unicode), each book once, ordered by title.
pub fn titles_in_categories(
    conn: &Connection,
    categories: &[String],
) -> Result<Vec<String>, OperationError> {
    if categories.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (1..=categories.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT b.title FROM books b
         WHERE EXISTS (
             SELECT 1 FROM books_categories bc
             JOIN categories c ON c.category_id = bc.category_id
             WHERE bc.book_id = b.book_id AND unicode_lower(c.name) IN ({placeholders})
         )
         ORDER BY b.title, b.book_id"
    );
    let lowered = categories.iter().map(|c| c.to_lowercase());
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(lowered), |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Titles containing `needle`, ignoring case, ordered by title.
pub fn titles_containing(conn: &Connection, needle: &str) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT title FROM books WHERE instr(unicode_lower(title), unicode_lower(?1)) > 0
         ORDER BY title, book_id",
    )?;
    let rows = stmt.query_map(params![needle], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of books whose title is longer than `length` characters.
pub fn count_titles_longer_than(conn: &Connection, length: i64) -> Result<i64, OperationError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM books WHERE length(title) > ?1",
        params![length],
        |row| row.get(0),
    )?;
    Ok(count)
}

// ── Bookshop: projections ───────────────────────────────────────────────────

/// Title and price of a book.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedTitle {
    pub title: String,
    pub price: Money,
}

/// Books priced strictly above `threshold`, most expensive first.
pub fn books_priced_above(
    conn: &Connection,
    threshold: Money,
) -> Result<Vec<PricedTitle>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT title, price_cents FROM books WHERE price_cents > ?1
         ORDER BY price_cents DESC, book_id",
    )?;
    let rows = stmt.query_map(params![threshold.cents()], |row| {
        Ok(PricedTitle {
            title: row.get(0)?,
            price: Money::from_cents(row.get(1)?),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Title, edition and price of a book.
#[derive(Debug, Clone, PartialEq)]
pub struct EditionSummary {
    pub title: String,
    pub edition_type: EditionType,
    pub price: Money,
}

/// Books released strictly before `date`, most recent first.
pub fn books_released_before(
    conn: &Connection,
    date: NaiveDate,
) -> Result<Vec<EditionSummary>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT title, edition_type, price_cents FROM books
         WHERE release_date IS NOT NULL AND release_date < ?1
         ORDER BY release_date DESC, book_id",
    )?;
    let rows = stmt.query_map(params![date], |row| {
        Ok(EditionSummary {
            title: row.get(0)?,
            edition_type: parse_column(row, 1)?,
            price: Money::from_cents(row.get(2)?),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Authors whose first name ends with `suffix` (case-sensitive), ordered by
/// first then last name.
pub fn authors_with_first_name_ending(
    conn: &Connection,
    suffix: &str,
) -> Result<Vec<Author>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT author_id, first_name, last_name FROM authors
         WHERE first_name IS NOT NULL
           AND length(first_name) >= length(?1)
           AND substr(first_name, length(first_name) - length(?1) + 1) = ?1
         ORDER BY first_name, last_name, author_id",
    )?;
    let rows = stmt.query_map(params![suffix], |row| {
        Ok(Author {
            author_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A book title with its author's name.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredTitle {
    pub title: String,
    pub author_first_name: Option<String>,
    pub author_last_name: String,
}

impl AuthoredTitle {
    pub fn author_name(&self) -> String {
        full_name(self.author_first_name.as_deref(), &self.author_last_name)
    }
}

/// Books whose author's last name starts with `prefix` (ignoring case),
/// ordered by book id.
pub fn books_by_author_last_name_prefix(
    conn: &Connection,
    prefix: &str,
) -> Result<Vec<AuthoredTitle>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT b.title, a.first_name, a.last_name
         FROM books b JOIN authors a ON a.author_id = b.author_id
         WHERE instr(unicode_lower(a.last_name), unicode_lower(?1)) = 1
         ORDER BY b.book_id",
    )?;
    let rows = stmt.query_map(params![prefix], |row| {
        Ok(AuthoredTitle {
            title: row.get(0)?,
            author_first_name: row.get(1)?,
            author_last_name: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Bookshop: aggregates ────────────────────────────────────────────────────

/// Total copies across all of an author's books.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorCopies {
    pub first_name: Option<String>,
    pub last_name: String,
    pub copies: i64,
}

impl AuthorCopies {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), &self.last_name)
    }
}

/// Copies per author, highest first. Authors without books count zero.
pub fn copies_by_author(conn: &Connection) -> Result<Vec<AuthorCopies>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT a.first_name, a.last_name, COALESCE(SUM(b.copies), 0) AS total
         FROM authors a LEFT JOIN books b ON b.author_id = a.author_id
         GROUP BY a.author_id
         ORDER BY total DESC, a.author_id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(AuthorCopies {
            first_name: row.get(0)?,
            last_name: row.get(1)?,
            copies: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Revenue of selling every copy of every book in a category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProfit {
    pub name: String,
    pub profit: Money,
}

/// Profit per category, highest first, ties by name.
pub fn profit_by_category(conn: &Connection) -> Result<Vec<CategoryProfit>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.name, COALESCE(SUM(b.copies * b.price_cents), 0) AS profit
         FROM categories c
         LEFT JOIN books_categories bc ON bc.category_id = c.category_id
         LEFT JOIN books b ON b.book_id = bc.book_id
         GROUP BY c.category_id
         ORDER BY profit DESC, c.name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CategoryProfit {
            name: row.get(0)?,
            profit: Money::from_cents(row.get(1)?),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A dated book inside a category listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedTitle {
    pub title: String,
    pub release_date: NaiveDate,
}

/// A category with its most recently released books.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecentBooks {
    pub name: String,
    pub books: Vec<DatedTitle>,
}

/// Every category (ordered by name) with up to `per_category` of its newest
/// dated books, newest first. Undated books are not listed.
pub fn recent_books_by_category(
    conn: &Connection,
    per_category: usize,
) -> Result<Vec<CategoryRecentBooks>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.category_id, c.name, r.title, r.release_date
         FROM categories c
         LEFT JOIN (
             SELECT bc.category_id, b.title, b.release_date,
                    ROW_NUMBER() OVER (
                        PARTITION BY bc.category_id
                        ORDER BY b.release_date DESC, b.book_id
                    ) AS pos
             FROM books_categories bc
             JOIN books b ON b.book_id = bc.book_id
             WHERE b.release_date IS NOT NULL
         ) r ON r.category_id = c.category_id AND r.pos <= ?1
         ORDER BY c.name, c.category_id, r.pos",
    )?;
    let limit = i64::try_from(per_category).unwrap_or(i64::MAX);
    let mut rows = stmt.query(params![limit])?;

    let mut result: Vec<CategoryRecentBooks> = Vec::new();
    let mut current_id = None;
    while let Some(row) = rows.next()? {
        let category_id: i64 = row.get(0)?;
        if current_id != Some(category_id) {
            current_id = Some(category_id);
            result.push(CategoryRecentBooks {
                name: row.get(1)?,
                books: Vec::new(),
            });
        }
        let title: Option<String> = row.get(2)?;
        let release_date: Option<NaiveDate> = row.get(3)?;
        if let (Some(title), Some(release_date), Some(group)) =
            (title, release_date, result.last_mut())
        {
            group.books.push(DatedTitle {
                title,
                release_date,
            });
        }
    }
    Ok(result)
}

/// All books, ordered by id.
pub fn list_books(conn: &Connection) -> Result<Vec<Book>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT book_id, title, description, release_date, copies, price_cents,
                edition_type, age_restriction, author_id
         FROM books ORDER BY book_id",
    )?;
    let rows = stmt.query_map([], row_to_book)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Product shop ────────────────────────────────────────────────────────────

/// A product with its seller's name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithSeller {
    pub name: String,
    pub price: Money,
    pub seller_first_name: Option<String>,
    pub seller_last_name: String,
}

impl ProductWithSeller {
    pub fn seller_name(&self) -> String {
        full_name(self.seller_first_name.as_deref(), &self.seller_last_name)
    }
}

/// Products priced within `min..=max`, cheapest first.
pub fn products_in_price_range(
    conn: &Connection,
    min: Money,
    max: Money,
) -> Result<Vec<ProductWithSeller>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT p.name, p.price_cents, u.first_name, u.last_name
         FROM products p JOIN users u ON u.id = p.seller_id
         WHERE p.price_cents BETWEEN ?1 AND ?2
         ORDER BY p.price_cents, p.id",
    )?;
    let rows = stmt.query_map(params![min.cents(), max.cents()], |row| {
        Ok(ProductWithSeller {
            name: row.get(0)?,
            price: Money::from_cents(row.get(1)?),
            seller_first_name: row.get(2)?,
            seller_last_name: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A sold product with its buyer's name.
#[derive(Debug, Clone, PartialEq)]
pub struct SoldProduct {
    pub name: String,
    pub price: Money,
    pub buyer_first_name: Option<String>,
    pub buyer_last_name: String,
}

/// A seller with every product of theirs that has a buyer.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerSales {
    pub seller: User,
    pub sold: Vec<SoldProduct>,
}

/// Users that sold at least one product, ordered by last then first name.
/// Products are listed in id order.
pub fn sellers_with_sales(conn: &Connection) -> Result<Vec<SellerSales>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.first_name, s.last_name, s.age,
                p.name, p.price_cents, b.first_name, b.last_name
         FROM users s
         JOIN products p ON p.seller_id = s.id
         JOIN users b ON b.id = p.buyer_id
         ORDER BY s.last_name, s.first_name, s.id, p.id",
    )?;
    let mut rows = stmt.query([])?;

    let mut result: Vec<SellerSales> = Vec::new();
    while let Some(row) = rows.next()? {
        let seller_id: i64 = row.get(0)?;
        let product = SoldProduct {
            name: row.get(4)?,
            price: Money::from_cents(row.get(5)?),
            buyer_first_name: row.get(6)?,
            buyer_last_name: row.get(7)?,
        };
        match result.last_mut() {
            Some(group) if group.seller.id == seller_id => group.sold.push(product),
            _ => result.push(SellerSales {
                seller: User {
                    id: seller_id,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    age: row.get(3)?,
                },
                sold: vec![product],
            }),
        }
    }
    Ok(result)
}

/// Product count and revenue for a product category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProductStats {
    pub name: String,
    pub products_count: i64,
    pub total_revenue: Money,
}

impl CategoryProductStats {
    /// Mean product price; zero for an empty category.
    pub fn average_price(&self) -> Money {
        self.total_revenue.average(self.products_count)
    }
}

/// Every product category by product count, largest first, ties by name.
pub fn category_product_stats(
    conn: &Connection,
) -> Result<Vec<CategoryProductStats>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.name, COUNT(p.id) AS products_count, COALESCE(SUM(p.price_cents), 0)
         FROM product_categories c
         LEFT JOIN category_products cp ON cp.category_id = c.id
         LEFT JOIN products p ON p.id = cp.product_id
         GROUP BY c.id
         ORDER BY products_count DESC, c.name, c.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CategoryProductStats {
            name: row.get(0)?,
            products_count: row.get(1)?,
            total_revenue: Money::from_cents(row.get(2)?),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts for every shop table.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ShopStats {
    pub authors: i64,
    pub books: i64,
    pub categories: i64,
    pub book_categories: i64,
    pub users: i64,
    pub products: i64,
    pub products_sold: i64,
    pub product_categories: i64,
    pub category_products: i64,
}

pub fn shop_stats(conn: &Connection) -> Result<ShopStats, OperationError> {
    let count = |sql: &str| -> Result<i64, OperationError> {
        Ok(conn.query_row(sql, [], |r| r.get(0))?)
    };

    Ok(ShopStats {
        authors: count("SELECT COUNT(*) FROM authors")?,
        books: count("SELECT COUNT(*) FROM books")?,
        categories: count("SELECT COUNT(*) FROM categories")?,
        book_categories: count("SELECT COUNT(*) FROM books_categories")?,
        users: count("SELECT COUNT(*) FROM users")?,
        products: count("SELECT COUNT(*) FROM products")?,
        products_sold: count("SELECT COUNT(*) FROM products WHERE buyer_id IS NOT NULL")?,
        product_categories: count("SELECT COUNT(*) FROM product_categories")?,
        category_products: count("SELECT COUNT(*) FROM category_products")?,
    })
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_book(row: &rusqlite::Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        book_id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        release_date: row.get(3)?,
        copies: row.get(4)?,
        price: Money::from_cents(row.get(5)?),
        edition_type: parse_column(row, 6)?,
        age_restriction: parse_column(row, 7)?,
        author_id: row.get(8)?,
    })
}

/// Parse a text column through `FromStr`.
fn parse_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
