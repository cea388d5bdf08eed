//! Data model for the bookshop: authors, books, categories.
//!
//! Entity ids are assigned by the database. Seed records refer to authors and
//! categories by their 1-based position in the seed files, which equals the
//! row id after a fresh reset.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;

/// Returned when an enum name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

// ── Enums ───────────────────────────────────────────────────────────────────

/// Print edition of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EditionType {
    Normal,
    Promo,
    Gold,
}

impl EditionType {
    pub const ALL: [EditionType; 3] = [Self::Normal, Self::Promo, Self::Gold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Promo => "Promo",
            Self::Gold => "Gold",
        }
    }
}

impl FromStr for EditionType {
    type Err = ParseEnumError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "edition type",
                value: s.to_string(),
            })
    }
}

/// Minimum reader age bracket of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgeRestriction {
    Minor,
    Teen,
    Adult,
}

impl AgeRestriction {
    pub const ALL: [AgeRestriction; 3] = [Self::Minor, Self::Teen, Self::Adult];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Teen => "Teen",
            Self::Adult => "Adult",
        }
    }
}

impl FromStr for AgeRestriction {
    type Err = ParseEnumError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "age restriction",
                value: s.to_string(),
            })
    }
}

macro_rules! string_conversions {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ParseEnumError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.as_str().to_string()
            }
        }
    };
}

string_conversions!(EditionType);
string_conversions!(AgeRestriction);

// ── Entities ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub author_id: i64,
    pub first_name: Option<String>,
    pub last_name: String,
}

impl Author {
    /// "First Last", or just the last name when there is no first name.
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), &self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub copies: i64,
    pub price: Money,
    pub edition_type: EditionType,
    pub age_restriction: AgeRestriction,
    pub author_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub category_id: i64,
    pub name: String,
}

/// Join an optional first name with a last name.
pub fn full_name(first: Option<&str>, last: &str) -> String {
    match first {
        Some(first) if !first.is_empty() => format!("{first} {last}"),
        _ => last.to_string(),
    }
}

// ── Seed records ────────────────────────────────────────────────────────────

/// An author as listed in `authors.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSeed {
    #[serde(default)]
    pub first_name: Option<String>,
    pub last_name: String,
}

/// A category as listed in `categories.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySeed {
    pub name: String,
}

/// A book as listed in `books.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSeed {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO date (`2004-11-23`).
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    pub copies: i64,
    pub price: Money,
    pub edition_type: EditionType,
    pub age_restriction: AgeRestriction,
    /// 1-based position in `authors.json`.
    pub author_id: i64,
    /// 1-based positions in `categories.json`.
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("gold".parse::<EditionType>(), Ok(EditionType::Gold));
        assert_eq!("PROMO".parse::<EditionType>(), Ok(EditionType::Promo));
        assert_eq!("miNor".parse::<AgeRestriction>(), Ok(AgeRestriction::Minor));
        assert_eq!(
            "child".parse::<AgeRestriction>().unwrap_err().to_string(),
            "unknown age restriction 'child'"
        );
    }

    #[test]
    fn book_seed_reads_enum_names() {
        let seed: BookSeed = serde_json::from_str(
            r#"{"title":"Dune","releaseDate":"1965-08-01","copies":3,"price":9.99,
                "editionType":"gold","ageRestriction":"Teen","authorId":1}"#,
        )
        .unwrap();
        assert_eq!(seed.edition_type, EditionType::Gold);
        assert_eq!(seed.age_restriction, AgeRestriction::Teen);
        assert_eq!(seed.price, Money::from_cents(999));
        assert!(seed.category_ids.is_empty());
    }

    #[test]
    fn full_name_skips_missing_first_name() {
        assert_eq!(full_name(Some("Ann"), "Lee"), "Ann Lee");
        assert_eq!(full_name(None, "Lee"), "Lee");
    }
}
