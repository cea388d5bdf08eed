//! Data model for the product shop: users selling and buying products.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// ── Entities ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Money,
    pub seller_id: i64,
    /// `None` while the product is unsold.
    pub buyer_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProduct {
    pub category_id: i64,
    pub product_id: i64,
}

// ── Import DTOs ─────────────────────────────────────────────────────────────

/// One entry of `users.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default)]
    pub first_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub age: Option<i32>,
}

/// One entry of `products.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: Money,
    pub seller_id: i64,
    #[serde(default)]
    pub buyer_id: Option<i64>,
}

/// One entry of `categories.json`. Entries without a name are dropped on import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of `categories-products.json`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryProductInput {
    #[serde(rename = "CategoryId", alias = "categoryId")]
    pub category_id: i64,
    #[serde(rename = "ProductId", alias = "productId")]
    pub product_id: i64,
}

// ── DTO mapping ─────────────────────────────────────────────────────────────

impl UserInput {
    /// Map to an entity; `id` is assigned by the database.
    pub fn into_user(self) -> User {
        User {
            id: 0,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
        }
    }
}

impl ProductInput {
    pub fn into_product(self) -> Product {
        Product {
            id: 0,
            name: self.name,
            price: self.price,
            seller_id: self.seller_id,
            buyer_id: self.buyer_id,
        }
    }
}

impl CategoryInput {
    /// `None` when the entry has no name.
    pub fn into_category(self) -> Option<Category> {
        self.name.map(|name| Category { id: 0, name })
    }
}

impl From<CategoryProductInput> for CategoryProduct {
    fn from(input: CategoryProductInput) -> Self {
        Self {
            category_id: input.category_id,
            product_id: input.product_id,
        }
    }
}
