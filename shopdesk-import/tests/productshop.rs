use shopdesk_catalog::ProductShopDataset;
use shopdesk_db::*;
use shopdesk_import::*;

const USERS: &str = r#"[
  {"firstName": "Ann", "lastName": "Lee", "age": 30},
  {"lastName": "Ross"},
  {"firstName": "Cy", "lastName": "Adams", "age": 51}
]"#;

const PRODUCTS: &str = r#"[
  {"name": "Lamp", "price": 650.5, "sellerId": 1, "buyerId": 2},
  {"name": "Desk", "price": 899.99, "sellerId": 1},
  {"name": "Chair", "price": 120, "sellerId": 3, "buyerId": 1}
]"#;

const CATEGORIES: &str = r#"[
  {"name": "Garden"},
  {"name": null},
  {"name": "Office"}
]"#;

const CATEGORY_PRODUCTS: &str = r#"[
  {"CategoryId": 1, "ProductId": 1},
  {"CategoryId": 2, "ProductId": 2},
  {"CategoryId": 2, "ProductId": 3}
]"#;

fn dataset() -> ProductShopDataset {
    ProductShopDataset {
        users: USERS.to_string(),
        products: PRODUCTS.to_string(),
        categories: CATEGORIES.to_string(),
        category_products: CATEGORY_PRODUCTS.to_string(),
    }
}

#[test]
fn each_importer_reports_its_count() {
    let conn = open_memory().unwrap();
    assert_eq!(import_users(&conn, USERS).unwrap(), "Successfully imported 3");
    assert_eq!(import_products(&conn, PRODUCTS).unwrap(), "Successfully imported 3");
    assert_eq!(import_categories(&conn, CATEGORIES).unwrap(), "Successfully imported 2");
    assert_eq!(
        import_category_products(&conn, CATEGORY_PRODUCTS).unwrap(),
        "Successfully imported 3"
    );

    let stats = shop_stats(&conn).unwrap();
    assert_eq!(stats.users, 3);
    assert_eq!(stats.products, 3);
    assert_eq!(stats.products_sold, 2);
    assert_eq!(stats.product_categories, 2);
    assert_eq!(stats.category_products, 3);
}

#[test]
fn empty_array_imports_nothing() {
    let conn = open_memory().unwrap();
    assert_eq!(import_users(&conn, "[]").unwrap(), "Successfully imported 0");
}

#[test]
fn import_dataset_runs_in_dependency_order() {
    let conn = open_memory().unwrap();
    let stats = import_dataset(&conn, &dataset(), Some(&SilentProgress)).unwrap();
    assert_eq!(
        stats,
        ImportStats {
            users: 3,
            products: 3,
            categories: 2,
            category_products: 3,
        }
    );
}

#[test]
fn prices_keep_their_cents() {
    let conn = open_memory().unwrap();
    import_users(&conn, USERS).unwrap();
    import_products(&conn, PRODUCTS).unwrap();

    let cents: Vec<i64> = conn
        .prepare("SELECT price_cents FROM products ORDER BY id")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(cents, [65050, 89999, 12000]);
}

#[test]
fn dangling_seller_rolls_back_the_batch() {
    let conn = open_memory().unwrap();
    import_users(&conn, USERS).unwrap();

    let products = r#"[
      {"name": "Lamp", "price": 10, "sellerId": 1},
      {"name": "Ghost", "price": 10, "sellerId": 42}
    ]"#;
    let err = import_products(&conn, products).unwrap_err();
    assert!(matches!(err, ImportError::Db(_)));
    assert_eq!(shop_stats(&conn).unwrap().products, 0);
}

#[test]
fn malformed_document_names_itself() {
    let conn = open_memory().unwrap();
    let err = import_users(&conn, r#"[{"firstName": "Ann"}]"#).unwrap_err();
    match err {
        ImportError::Json { document, .. } => assert_eq!(document, "users"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(shop_stats(&conn).unwrap().users, 0);
}

#[test]
fn duplicate_category_product_pair_is_rejected() {
    let conn = open_memory().unwrap();
    import_dataset(&conn, &dataset(), None).unwrap();

    let err = import_category_products(&conn, r#"[{"CategoryId": 1, "ProductId": 1}]"#);
    assert!(err.is_err());
    assert_eq!(shop_stats(&conn).unwrap().category_products, 3);
}
