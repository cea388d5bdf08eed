//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(about = "Seed, import and report on the bookshop and product-shop databases", long_about = None)]
pub(crate) struct Cli {
    /// Path to the database file (default: ~/.cache/shopdesk/shopdesk.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Root directory holding bookshop/ and productshop/ fixtures (default: ./datasets)
    #[arg(long, global = true)]
    pub datasets: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Bookshop text reports and bulk updates
    Bookshop {
        #[command(subcommand)]
        report: BookshopReport,
    },

    /// Product-shop import and JSON reports
    Productshop {
        #[command(subcommand)]
        action: ProductshopAction,
    },

    /// Reseed both shops from the fixtures and print every report
    RunAll,

    /// Show row counts for every table
    Stats,
}

#[derive(Subcommand)]
pub(crate) enum BookshopReport {
    /// Drop the bookshop tables and reseed them from the fixtures
    Reset,

    /// Titles for an age restriction (minor, teen, adult)
    AgeRestriction { command: String },

    /// Gold editions with fewer than 5000 copies
    Golden,

    /// Books priced above 40, most expensive first
    ByPrice,

    /// Books released in any year but the given one
    NotReleasedIn { year: i32 },

    /// Books in any of the given categories
    ByCategory {
        #[arg(required = true, num_args = 1..)]
        categories: Vec<String>,
    },

    /// Books released before a date (dd-MM-yyyy)
    ReleasedBefore { date: String },

    /// Authors whose first name ends with a suffix
    AuthorsEndingIn { suffix: String },

    /// Titles containing a string, ignoring case
    TitlesContaining { needle: String },

    /// Books by authors whose last name starts with a prefix
    ByAuthor { prefix: String },

    /// Number of books with a title longer than the given length
    CountBooks { length: i64 },

    /// Total copies per author
    CopiesByAuthor,

    /// Profit per category
    ProfitByCategory,

    /// The three newest books of every category
    MostRecent,

    /// Add 5.00 to the price of every book released before 2010
    IncreasePrices,

    /// Delete books with fewer than 4200 copies
    RemoveBooks,
}

#[derive(Subcommand)]
pub(crate) enum ProductshopAction {
    /// Reset the product-shop tables and import the fixture documents
    Import,

    /// Products priced 500 to 1000
    ProductsInRange,

    /// Users with sold products and their buyers
    SoldProducts,

    /// Categories by product count
    CategoriesByProducts,

    /// Users by number of sold products
    UsersAndProducts,

    /// Write every report to <out>/<report>.json
    Export {
        /// Output directory (created if missing)
        #[arg(long)]
        out: PathBuf,
    },
}
