use shopdesk_catalog::{
    AgeRestriction, BookShopSeed, EditionType, FixtureError, Money, ProductShopDataset,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn load_bookshop_seed() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "authors.json",
        r#"[{"firstName":"Ursula","lastName":"Le Guin"},{"lastName":"Homer"}]"#,
    );
    write_json(tmp.path(), "categories.json", r#"[{"name":"Fantasy"}]"#);
    write_json(
        tmp.path(),
        "books.json",
        r#"[
  {
    "title": "A Wizard of Earthsea",
    "description": "Ged learns the true names of things.",
    "releaseDate": "1968-11-01",
    "copies": 4100,
    "price": 12.5,
    "editionType": "Gold",
    "ageRestriction": "Teen",
    "authorId": 1,
    "categoryIds": [1]
  },
  {
    "title": "The Odyssey",
    "releaseDate": null,
    "copies": 900,
    "price": 7,
    "editionType": "Normal",
    "ageRestriction": "Minor",
    "authorId": 2
  }
]"#,
    );

    let seed = BookShopSeed::load(tmp.path()).unwrap();
    assert_eq!(seed.authors.len(), 2);
    assert_eq!(seed.authors[1].first_name, None);
    assert_eq!(seed.categories[0].name, "Fantasy");
    assert_eq!(seed.books.len(), 2);

    let earthsea = &seed.books[0];
    assert_eq!(earthsea.edition_type, EditionType::Gold);
    assert_eq!(earthsea.age_restriction, AgeRestriction::Teen);
    assert_eq!(earthsea.price, Money::from_cents(1250));
    assert_eq!(earthsea.category_ids, vec![1]);

    let odyssey = &seed.books[1];
    assert!(odyssey.release_date.is_none());
    assert_eq!(odyssey.description, "");
}

#[test]
fn unknown_edition_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    write_json(tmp.path(), "authors.json", "[]");
    write_json(tmp.path(), "categories.json", "[]");
    write_json(
        tmp.path(),
        "books.json",
        r#"[{"title":"X","copies":1,"price":1,"editionType":"Platinum","ageRestriction":"Adult","authorId":1}]"#,
    );

    let err = BookShopSeed::load(tmp.path()).unwrap_err();
    assert!(matches!(err, FixtureError::Parse { .. }));
    assert!(err.to_string().contains("books.json"));
}

#[test]
fn missing_directory_is_reported() {
    let tmp = TempDir::new().unwrap();
    let err = ProductShopDataset::load(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, FixtureError::DirNotFound(_)));
}

#[test]
fn product_dataset_keeps_raw_text() {
    let tmp = TempDir::new().unwrap();
    write_json(tmp.path(), "users.json", r#"[{"lastName":"Ross"}]"#);
    write_json(tmp.path(), "products.json", "[]");
    write_json(tmp.path(), "categories.json", "[]");
    write_json(tmp.path(), "categories-products.json", "[]");

    let dataset = ProductShopDataset::load(tmp.path()).unwrap();
    assert_eq!(dataset.users, r#"[{"lastName":"Ross"}]"#);
    assert_eq!(dataset.category_products, "[]");
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    write_json(tmp.path(), "users.json", "[]");

    let err = ProductShopDataset::load(tmp.path()).unwrap_err();
    match err {
        FixtureError::Io { path, .. } => assert!(path.ends_with("products.json")),
        other => panic!("expected Io error, got {other:?}"),
    }
}
