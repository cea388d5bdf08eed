//! Bookshop text reports and bulk mutations.
//!
//! Reports render one record per line and trim trailing whitespace, so an
//! empty result is the empty string.

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use shopdesk_catalog::Money;
use shopdesk_catalog::bookshop::{AgeRestriction, EditionType};
use shopdesk_db::{operations, queries};

use crate::ReportError;

/// Gold editions with fewer copies than this are "golden".
pub const GOLDEN_MAX_COPIES: i64 = 5000;

/// Books strictly above this price are listed by [`books_by_price`].
pub const PRICE_THRESHOLD: Money = Money::from_units(40);

/// Books released before January 1st of this year get [`PRICE_INCREASE`].
pub const PRICE_INCREASE_BEFORE_YEAR: i32 = 2010;
pub const PRICE_INCREASE: Money = Money::from_units(5);

/// Books with fewer copies than this are removed by [`remove_books`].
pub const MIN_COPIES: i64 = 4200;

pub const RECENT_BOOKS_PER_CATEGORY: usize = 3;

/// Date format accepted by [`books_released_before`].
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// ── Title lists ─────────────────────────────────────────────────────────────

/// Titles for an age restriction given by name (`"teEN"` works), by title.
pub fn books_by_age_restriction(conn: &Connection, command: &str) -> Result<String, ReportError> {
    let restriction: AgeRestriction = command.parse()?;
    let titles = queries::titles_by_age_restriction(conn, restriction)?;
    Ok(render_lines(titles))
}

pub fn golden_books(conn: &Connection) -> Result<String, ReportError> {
    let titles =
        queries::titles_by_edition_below_copies(conn, EditionType::Gold, GOLDEN_MAX_COPIES)?;
    Ok(render_lines(titles))
}

pub fn books_by_price(conn: &Connection) -> Result<String, ReportError> {
    let books = queries::books_priced_above(conn, PRICE_THRESHOLD)?;
    Ok(render_lines(
        books.into_iter().map(|b| format!("{} - ${}", b.title, b.price)),
    ))
}

pub fn books_not_released_in(conn: &Connection, year: i32) -> Result<String, ReportError> {
    Ok(render_lines(queries::titles_not_released_in(conn, year)?))
}

/// Titles in any of the whitespace-separated category names in `input`.
pub fn books_by_category(conn: &Connection, input: &str) -> Result<String, ReportError> {
    let categories: Vec<String> = input.split_whitespace().map(str::to_lowercase).collect();
    Ok(render_lines(queries::titles_in_categories(conn, &categories)?))
}

/// Books released before a `dd-MM-yyyy` date, newest first.
pub fn books_released_before(conn: &Connection, date: &str) -> Result<String, ReportError> {
    let cutoff = parse_date(date)?;
    let books = queries::books_released_before(conn, cutoff)?;
    Ok(render_lines(books.into_iter().map(|b| {
        format!("{} - {} - ${}", b.title, b.edition_type, b.price)
    })))
}

pub fn author_names_ending_in(conn: &Connection, suffix: &str) -> Result<String, ReportError> {
    let authors = queries::authors_with_first_name_ending(conn, suffix)?;
    Ok(render_lines(authors.iter().map(|a| a.full_name())))
}

pub fn book_titles_containing(conn: &Connection, needle: &str) -> Result<String, ReportError> {
    Ok(render_lines(queries::titles_containing(conn, needle)?))
}

/// Books by authors whose last name starts with `prefix`, with the author.
pub fn books_by_author(conn: &Connection, prefix: &str) -> Result<String, ReportError> {
    let books = queries::books_by_author_last_name_prefix(conn, prefix)?;
    Ok(render_lines(
        books
            .iter()
            .map(|b| format!("{} ({})", b.title, b.author_name())),
    ))
}

pub fn count_books(conn: &Connection, length: i64) -> Result<i64, ReportError> {
    Ok(queries::count_titles_longer_than(conn, length)?)
}

// ── Aggregates ──────────────────────────────────────────────────────────────

pub fn count_copies_by_author(conn: &Connection) -> Result<String, ReportError> {
    let rows = queries::copies_by_author(conn)?;
    Ok(render_lines(
        rows.iter()
            .map(|r| format!("{} - {}", r.full_name(), r.copies)),
    ))
}

pub fn total_profit_by_category(conn: &Connection) -> Result<String, ReportError> {
    let rows = queries::profit_by_category(conn)?;
    Ok(render_lines(
        rows.into_iter().map(|r| format!("{} ${}", r.name, r.profit)),
    ))
}

/// Each category as a `--Name` header followed by its newest books.
pub fn most_recent_books(conn: &Connection) -> Result<String, ReportError> {
    let groups = queries::recent_books_by_category(conn, RECENT_BOOKS_PER_CATEGORY)?;
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("--{}", group.name));
        lines.extend(
            group
                .books
                .into_iter()
                .map(|b| format!("{} ({})", b.title, b.release_date.year())),
        );
    }
    Ok(render_lines(lines))
}

// ── Mutations ───────────────────────────────────────────────────────────────

/// Raise the price of every book released before 2010. Returns the number of
/// books changed.
pub fn increase_prices(conn: &Connection) -> Result<usize, ReportError> {
    let changed = operations::increase_prices_released_before(
        conn,
        PRICE_INCREASE_BEFORE_YEAR,
        PRICE_INCREASE,
    )?;
    log::debug!("increased the price of {changed} books by {PRICE_INCREASE}");
    Ok(changed)
}

/// Delete low-stock books. Returns the number of books removed.
pub fn remove_books(conn: &Connection) -> Result<usize, ReportError> {
    let removed = operations::remove_books_with_copies_below(conn, MIN_COPIES)?;
    log::debug!("removed {removed} books with fewer than {MIN_COPIES} copies");
    Ok(removed)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn parse_date(input: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        ReportError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

fn render_lines(lines: impl IntoIterator<Item = String>) -> String {
    let joined = lines.into_iter().collect::<Vec<_>>().join("\n");
    joined.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lines_trims_trailing_whitespace() {
        let lines = vec!["a".to_string(), "b  ".to_string(), String::new()];
        assert_eq!(render_lines(lines), "a\nb");
        assert_eq!(render_lines(Vec::new()), "");
    }

    #[test]
    fn parse_date_expects_day_first() {
        assert_eq!(
            parse_date("12-04-1992").unwrap(),
            NaiveDate::from_ymd_opt(1992, 4, 12).unwrap()
        );
        assert!(matches!(
            parse_date("1992-04-12"),
            Err(ReportError::InvalidDate { .. })
        ));
        assert!(parse_date("31-02-2000").is_err());
    }
}
