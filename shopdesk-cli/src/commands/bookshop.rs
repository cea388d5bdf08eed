use rusqlite::Connection;
use shopdesk_catalog::BookShopSeed;
use shopdesk_import::{LogProgress, SeedStats};
use shopdesk_lib::bookshop;

use crate::CliError;
use crate::cli_types::BookshopReport;

use super::{Context, print_report};

pub(crate) fn run_bookshop(ctx: &Context, report: BookshopReport) -> Result<(), CliError> {
    let conn = ctx.open_db()?;

    match report {
        BookshopReport::Reset => {
            reseed(ctx, &conn)?;
        }
        BookshopReport::AgeRestriction { command } => {
            print_report(&bookshop::books_by_age_restriction(&conn, &command)?);
        }
        BookshopReport::Golden => print_report(&bookshop::golden_books(&conn)?),
        BookshopReport::ByPrice => print_report(&bookshop::books_by_price(&conn)?),
        BookshopReport::NotReleasedIn { year } => {
            print_report(&bookshop::books_not_released_in(&conn, year)?);
        }
        BookshopReport::ByCategory { categories } => {
            print_report(&bookshop::books_by_category(&conn, &categories.join(" "))?);
        }
        BookshopReport::ReleasedBefore { date } => {
            print_report(&bookshop::books_released_before(&conn, &date)?);
        }
        BookshopReport::AuthorsEndingIn { suffix } => {
            print_report(&bookshop::author_names_ending_in(&conn, &suffix)?);
        }
        BookshopReport::TitlesContaining { needle } => {
            print_report(&bookshop::book_titles_containing(&conn, &needle)?);
        }
        BookshopReport::ByAuthor { prefix } => {
            print_report(&bookshop::books_by_author(&conn, &prefix)?);
        }
        BookshopReport::CountBooks { length } => {
            println!("{}", bookshop::count_books(&conn, length)?);
        }
        BookshopReport::CopiesByAuthor => print_report(&bookshop::count_copies_by_author(&conn)?),
        BookshopReport::ProfitByCategory => {
            print_report(&bookshop::total_profit_by_category(&conn)?);
        }
        BookshopReport::MostRecent => print_report(&bookshop::most_recent_books(&conn)?),
        BookshopReport::IncreasePrices => {
            let changed = bookshop::increase_prices(&conn)?;
            log::info!("Increased the price of {} book(s)", changed);
        }
        BookshopReport::RemoveBooks => {
            let removed = bookshop::remove_books(&conn)?;
            log::info!("Removed {} book(s)", removed);
        }
    }

    Ok(())
}

/// Drop the bookshop tables and load the fixture seed.
pub(crate) fn reseed(ctx: &Context, conn: &Connection) -> Result<SeedStats, CliError> {
    let dir = &ctx.datasets.bookshop;
    let seed = BookShopSeed::load(dir).map_err(|e| CliError::fixture(e.to_string()))?;

    let stats = shopdesk_import::reset_database(conn, &seed, Some(&LogProgress::default()))
        .map_err(|e| CliError::import(format!("Failed to seed from {}: {}", dir.display(), e)))?;
    log::debug!("{} book-category links", stats.book_categories);
    Ok(stats)
}
