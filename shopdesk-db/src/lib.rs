//! SQLite persistence layer for both shops.
//!
//! Provides schema creation, inserts, the bulk bookshop mutations, and typed
//! read queries backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, book_price, increase_prices_released_before, insert_author, insert_book,
    insert_category, insert_category_product, insert_product, insert_product_category,
    insert_user, link_book_category, remove_books_with_copies_below,
};
pub use queries::{
    AuthorCopies, AuthoredTitle, CategoryProductStats, CategoryProfit, CategoryRecentBooks,
    DatedTitle, EditionSummary, PricedTitle, ProductWithSeller, SellerSales, ShopStats,
    SoldProduct, authors_with_first_name_ending, books_by_author_last_name_prefix,
    books_priced_above, books_released_before, category_product_stats, copies_by_author,
    count_titles_longer_than, list_books, products_in_price_range, profit_by_category,
    recent_books_by_category, sellers_with_sales, shop_stats, titles_by_age_restriction,
    titles_by_edition_below_copies, titles_containing, titles_in_categories,
    titles_not_released_in,
};
pub use schema::{
    SchemaError, open_database, open_memory, register_functions, reset_bookshop, reset_productshop,
};
