//! Product-shop JSON reports.
//!
//! Output uses camelCase keys and two-space indentation. Prices are JSON
//! numbers except in the category summary, which carries pre-formatted
//! two-decimal strings.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::Serialize;
use shopdesk_catalog::Money;
use shopdesk_db::queries;

use crate::ReportError;

/// Inclusive price bounds for [`products_in_range`].
pub const RANGE_MIN: Money = Money::from_units(500);
pub const RANGE_MAX: Money = Money::from_units(1000);

pub type ReportFn = fn(&Connection) -> Result<String, ReportError>;

/// Every report with the file stem it is exported under.
pub const PRODUCTSHOP_REPORTS: &[(&str, ReportFn)] = &[
    ("products-in-range", products_in_range),
    ("sold-products", sold_products),
    ("categories-by-products", categories_by_products_count),
    ("users-and-products", users_with_products),
];

// ── Output shapes ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProductInRange {
    name: String,
    price: Money,
    seller: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SellerSummary {
    first_name: Option<String>,
    last_name: String,
    sold_products: Vec<SoldProductSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SoldProductSummary {
    name: String,
    price: Money,
    buyer_first_name: Option<String>,
    buyer_last_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategorySummary {
    category: String,
    products_count: i64,
    average_price: String,
    total_revenue: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UsersAndProducts {
    users_count: usize,
    users: Vec<UserSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<i32>,
    sold_products: SoldProductList,
}

#[derive(Serialize)]
struct SoldProductList {
    count: usize,
    products: Vec<NamedPrice>,
}

#[derive(Serialize)]
struct NamedPrice {
    name: String,
    price: Money,
}

// ── Reports ─────────────────────────────────────────────────────────────────

/// Products priced 500 to 1000 inclusive, cheapest first, with the seller.
pub fn products_in_range(conn: &Connection) -> Result<String, ReportError> {
    let products: Vec<_> = queries::products_in_price_range(conn, RANGE_MIN, RANGE_MAX)?
        .into_iter()
        .map(|p| ProductInRange {
            seller: p.seller_name(),
            name: p.name,
            price: p.price,
        })
        .collect();
    to_json(&products)
}

/// Users with at least one sold product, by last then first name.
pub fn sold_products(conn: &Connection) -> Result<String, ReportError> {
    let sellers: Vec<_> = queries::sellers_with_sales(conn)?
        .into_iter()
        .map(|s| SellerSummary {
            first_name: s.seller.first_name,
            last_name: s.seller.last_name,
            sold_products: s
                .sold
                .into_iter()
                .map(|p| SoldProductSummary {
                    name: p.name,
                    price: p.price,
                    buyer_first_name: p.buyer_first_name,
                    buyer_last_name: p.buyer_last_name,
                })
                .collect(),
        })
        .collect();
    to_json(&sellers)
}

pub fn categories_by_products_count(conn: &Connection) -> Result<String, ReportError> {
    let categories: Vec<_> = queries::category_product_stats(conn)?
        .into_iter()
        .map(|c| CategorySummary {
            average_price: c.average_price().to_string(),
            total_revenue: c.total_revenue.to_string(),
            category: c.name,
            products_count: c.products_count,
        })
        .collect();
    to_json(&categories)
}

/// Sellers by number of sold products, most first. Null fields are omitted.
pub fn users_with_products(conn: &Connection) -> Result<String, ReportError> {
    let mut sellers = queries::sellers_with_sales(conn)?;
    // Stable, so equal counts keep the last/first name order.
    sellers.sort_by(|a, b| b.sold.len().cmp(&a.sold.len()));

    let users: Vec<_> = sellers
        .into_iter()
        .map(|s| UserSummary {
            first_name: s.seller.first_name,
            last_name: s.seller.last_name,
            age: s.seller.age,
            sold_products: SoldProductList {
                count: s.sold.len(),
                products: s
                    .sold
                    .into_iter()
                    .map(|p| NamedPrice {
                        name: p.name,
                        price: p.price,
                    })
                    .collect(),
            },
        })
        .collect();

    to_json(&UsersAndProducts {
        users_count: users.len(),
        users,
    })
}

/// Write every report to `dir/<name>.json`, creating `dir` if needed.
/// Returns the written paths in report order.
pub fn export_all(conn: &Connection, dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(PRODUCTSHOP_REPORTS.len());
    for (name, report) in PRODUCTSHOP_REPORTS {
        let path = dir.join(format!("{name}.json"));
        std::fs::write(&path, report(conn)?)?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(value)?)
}
