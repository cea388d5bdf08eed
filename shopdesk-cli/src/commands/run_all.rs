use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use shopdesk_lib::{ReportError, bookshop, productshop};

use crate::CliError;

use super::{Context, print_report};

/// Reseed both shops from the fixtures, then print every report in turn.
/// Bookshop mutations run last since they change the data the reports read.
pub(crate) fn run_all(ctx: &Context) -> Result<(), CliError> {
    let conn = ctx.open_db()?;

    let seeded = super::bookshop::reseed(ctx, &conn)?;
    let imported = super::productshop::reimport(ctx, &conn)?;
    log::info!(
        "Loaded {} books and {} products into {}",
        seeded.books,
        imported.products,
        ctx.db_path.display(),
    );
    crate::log_blank();

    section("Books by age restriction (minor)", bookshop::books_by_age_restriction(&conn, "minor"))?;
    section("Golden books", bookshop::golden_books(&conn))?;
    section("Books by price", bookshop::books_by_price(&conn))?;
    section("Books not released in 2000", bookshop::books_not_released_in(&conn, 2000))?;
    section(
        "Books by category (horror mystery drama)",
        bookshop::books_by_category(&conn, "horror mystery drama"),
    )?;
    section(
        "Books released before 12-04-1992",
        bookshop::books_released_before(&conn, "12-04-1992"),
    )?;
    section("Authors ending in 'e'", bookshop::author_names_ending_in(&conn, "e"))?;
    section("Titles containing 'sK'", bookshop::book_titles_containing(&conn, "sK"))?;
    section("Books by authors starting with 'R'", bookshop::books_by_author(&conn, "R"))?;
    section(
        "Books with titles longer than 12",
        bookshop::count_books(&conn, 12).map(|n| n.to_string()),
    )?;
    section("Copies by author", bookshop::count_copies_by_author(&conn))?;
    section("Profit by category", bookshop::total_profit_by_category(&conn))?;
    section("Most recent books", bookshop::most_recent_books(&conn))?;
    section(
        "Increased prices",
        bookshop::increase_prices(&conn).map(|n| n.to_string()),
    )?;
    section(
        "Removed books",
        bookshop::remove_books(&conn).map(|n| n.to_string()),
    )?;

    for (name, report) in productshop::PRODUCTSHOP_REPORTS {
        section(name, report(&conn))?;
    }

    Ok(())
}

fn section(title: &str, body: Result<String, ReportError>) -> Result<(), CliError> {
    let body = body?;
    println!(
        "{}",
        format!("== {title} ==").if_supports_color(Stdout, |t| t.bold()),
    );
    print_report(&body);
    println!();
    Ok(())
}
