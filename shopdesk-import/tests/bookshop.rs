use chrono::NaiveDate;
use shopdesk_catalog::BookShopSeed;
use shopdesk_db::*;
use shopdesk_import::*;

fn seed() -> BookShopSeed {
    let authors = r#"[
      {"firstName": "Stephen", "lastName": "King"},
      {"lastName": "Homer"}
    ]"#;
    let categories = r#"[{"name": "Horror"}, {"name": "Epic"}, {"name": "Classic"}]"#;
    let books = r#"[
      {
        "title": "The Shining",
        "releaseDate": "1977-01-28",
        "copies": 4100,
        "price": 24.99,
        "editionType": "Gold",
        "ageRestriction": "Adult",
        "authorId": 1,
        "categoryIds": [1]
      },
      {
        "title": "The Iliad",
        "description": "Troy.",
        "copies": 9000,
        "price": 12.5,
        "editionType": "Normal",
        "ageRestriction": "Teen",
        "authorId": 2,
        "categoryIds": [2, 3]
      }
    ]"#;
    BookShopSeed {
        authors: serde_json::from_str(authors).unwrap(),
        categories: serde_json::from_str(categories).unwrap(),
        books: serde_json::from_str(books).unwrap(),
    }
}

#[test]
fn reset_loads_the_seed() {
    let conn = open_memory().unwrap();
    let stats = reset_database(&conn, &seed(), Some(&SilentProgress)).unwrap();
    assert_eq!(
        stats,
        SeedStats {
            authors: 2,
            categories: 3,
            books: 2,
            book_categories: 3,
        }
    );

    let books = list_books(&conn).unwrap();
    assert_eq!(books[0].title, "The Shining");
    assert_eq!(books[0].release_date, NaiveDate::from_ymd_opt(1977, 1, 28));
    assert_eq!(books[1].release_date, None);
    assert_eq!(books[1].author_id, 2);
}

#[test]
fn reset_discards_previous_rows() {
    let conn = open_memory().unwrap();
    reset_database(&conn, &seed(), None).unwrap();
    remove_books_with_copies_below(&conn, 5000).unwrap();
    reset_database(&conn, &seed(), None).unwrap();

    let stats = shop_stats(&conn).unwrap();
    assert_eq!(stats.authors, 2);
    assert_eq!(stats.books, 2);
    assert_eq!(stats.book_categories, 3);
    // Ids restart after the reset.
    assert_eq!(list_books(&conn).unwrap()[0].book_id, 1);
}

#[test]
fn unknown_author_position_is_reported() {
    let conn = open_memory().unwrap();
    let mut seed = seed();
    seed.books[1].author_id = 3;

    let err = reset_database(&conn, &seed, None).unwrap_err();
    assert!(matches!(
        err,
        ImportError::UnknownReference {
            entity: "author",
            position: 3
        }
    ));
    assert_eq!(shop_stats(&conn).unwrap().books, 0);
}

#[test]
fn zero_category_position_is_reported() {
    let conn = open_memory().unwrap();
    let mut seed = seed();
    seed.books[0].category_ids = vec![0];

    let err = reset_database(&conn, &seed, None).unwrap_err();
    assert!(matches!(
        err,
        ImportError::UnknownReference {
            entity: "category",
            ..
        }
    ));
}

#[test]
fn failed_reset_keeps_existing_rows() {
    let conn = open_memory().unwrap();
    reset_database(&conn, &seed(), None).unwrap();

    let mut broken = seed();
    broken.books[0].author_id = 7;
    assert!(reset_database(&conn, &broken, None).is_err());
    assert_eq!(shop_stats(&conn).unwrap().books, 2);
}
