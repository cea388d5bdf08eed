use chrono::NaiveDate;
use shopdesk_catalog::Money;
use shopdesk_catalog::bookshop::{AgeRestriction, Book, EditionType};
use shopdesk_catalog::productshop::{CategoryProduct, Product, User};
use shopdesk_db::*;

fn test_book(title: &str, release_date: Option<NaiveDate>, copies: i64, price_cents: i64) -> Book {
    Book {
        book_id: 0,
        title: title.to_string(),
        description: "A test book.".to_string(),
        release_date,
        copies,
        price: Money::from_cents(price_cents),
        edition_type: EditionType::Normal,
        age_restriction: AgeRestriction::Teen,
        author_id: 1,
    }
}

fn setup_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    insert_author(&conn, Some("Ann"), "Lee").unwrap();
    let category = insert_category(&conn, "Drama").unwrap();

    let books = [
        test_book("Old", NaiveDate::from_ymd_opt(1999, 12, 31), 5000, 1000),
        test_book("Edge", NaiveDate::from_ymd_opt(2010, 1, 1), 4100, 2000),
        test_book("Undated", None, 4199, 3000),
        test_book("Plenty", NaiveDate::from_ymd_opt(2009, 6, 1), 4200, 4000),
    ];
    for book in &books {
        let id = insert_book(&conn, book).unwrap();
        link_book_category(&conn, id, category).unwrap();
    }
    conn
}

#[test]
fn insert_returns_sequential_ids() {
    let conn = open_memory().unwrap();
    assert_eq!(insert_author(&conn, None, "Homer").unwrap(), 1);
    assert_eq!(insert_author(&conn, Some("Ann"), "Lee").unwrap(), 2);
    assert_eq!(insert_category(&conn, "Epic").unwrap(), 1);
}

#[test]
fn increase_prices_only_touches_dated_books_before_year() {
    let conn = setup_db();
    let changed = increase_prices_released_before(&conn, 2010, Money::from_units(5)).unwrap();
    assert_eq!(changed, 2);

    assert_eq!(book_price(&conn, 1).unwrap(), Money::from_cents(1500));
    assert_eq!(book_price(&conn, 2).unwrap(), Money::from_cents(2000));
    assert_eq!(book_price(&conn, 3).unwrap(), Money::from_cents(3000));
    assert_eq!(book_price(&conn, 4).unwrap(), Money::from_cents(4500));
}

#[test]
fn remove_books_cascades_category_links() {
    let conn = setup_db();
    let removed = remove_books_with_copies_below(&conn, 4200).unwrap();
    assert_eq!(removed, 2);

    let titles: Vec<_> = list_books(&conn)
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(titles, ["Old", "Plenty"]);

    let links: i64 = conn
        .query_row("SELECT COUNT(*) FROM books_categories", [], |row| row.get(0))
        .unwrap();
    assert_eq!(links, 2);

    assert_eq!(remove_books_with_copies_below(&conn, 4200).unwrap(), 0);
}

#[test]
fn book_price_of_missing_book_is_not_found() {
    let conn = setup_db();
    let err = book_price(&conn, 99).unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
}

#[test]
fn book_requires_existing_author() {
    let conn = open_memory().unwrap();
    let err = insert_book(&conn, &test_book("Orphan", None, 1, 100)).unwrap_err();
    assert!(matches!(err, OperationError::Sqlite(_)));
}

#[test]
fn category_names_are_unique() {
    let conn = open_memory().unwrap();
    insert_category(&conn, "Drama").unwrap();
    assert!(insert_category(&conn, "Drama").is_err());
}

#[test]
fn product_foreign_keys_are_enforced() {
    let conn = open_memory().unwrap();
    let seller = insert_user(
        &conn,
        &User {
            id: 0,
            first_name: Some("Ann".to_string()),
            last_name: "Lee".to_string(),
            age: Some(30),
        },
    )
    .unwrap();

    let mut product = Product {
        id: 0,
        name: "Lamp".to_string(),
        price: Money::from_cents(65000),
        seller_id: seller,
        buyer_id: None,
    };
    let product_id = insert_product(&conn, &product).unwrap();

    product.buyer_id = Some(42);
    assert!(insert_product(&conn, &product).is_err());

    let category_id = insert_product_category(&conn, "Garden").unwrap();
    let link = CategoryProduct {
        category_id,
        product_id,
    };
    insert_category_product(&conn, &link).unwrap();
    // Composite key rejects the same pair twice.
    assert!(insert_category_product(&conn, &link).is_err());

    let dangling = CategoryProduct {
        category_id,
        product_id: 99,
    };
    assert!(insert_category_product(&conn, &dangling).is_err());
}
