//! Reset and seed the bookshop tables.
//!
//! Seed books refer to authors and categories by their 1-based position in
//! the seed files. Positions are resolved against the ids handed out during
//! this seed, so a dangling reference is reported before it reaches the
//! foreign key check.

use rusqlite::Connection;
use shopdesk_catalog::BookShopSeed;
use shopdesk_catalog::bookshop::{Book, BookSeed};
use shopdesk_db::{operations, schema};

use crate::ImportError;
use crate::progress::ImportProgress;

/// Counts from seeding the bookshop.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub authors: usize,
    pub categories: usize,
    pub books: usize,
    pub book_categories: usize,
}

/// Drop every bookshop row and load `seed` in a single transaction.
pub fn reset_database(
    conn: &Connection,
    seed: &BookShopSeed,
    progress: Option<&dyn ImportProgress>,
) -> Result<SeedStats, ImportError> {
    let tx = conn.unchecked_transaction()?;
    schema::reset_bookshop(&tx)?;

    let mut stats = SeedStats::default();

    if let Some(p) = progress {
        p.on_phase("Seeding authors and categories");
    }
    let mut author_ids = Vec::with_capacity(seed.authors.len());
    for author in &seed.authors {
        let id = operations::insert_author(&tx, author.first_name.as_deref(), &author.last_name)?;
        author_ids.push(id);
        stats.authors += 1;
    }
    let mut category_ids = Vec::with_capacity(seed.categories.len());
    for category in &seed.categories {
        category_ids.push(operations::insert_category(&tx, &category.name)?);
        stats.categories += 1;
    }

    if let Some(p) = progress {
        p.on_phase(&format!("Seeding {} books", seed.books.len()));
    }
    for (i, book_seed) in seed.books.iter().enumerate() {
        let author_id = resolve("author", &author_ids, book_seed.author_id)?;
        let book_id = operations::insert_book(&tx, &to_book(book_seed, author_id))?;
        stats.books += 1;

        for &position in &book_seed.category_ids {
            let category_id = resolve("category", &category_ids, position)?;
            operations::link_book_category(&tx, book_id, category_id)?;
            stats.book_categories += 1;
        }

        if let Some(p) = progress {
            p.on_record(i + 1, seed.books.len(), &book_seed.title);
        }
    }

    tx.commit()?;

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Seeded {} authors, {} categories, {} books",
            stats.authors, stats.categories, stats.books
        ));
    }
    Ok(stats)
}

fn to_book(seed: &BookSeed, author_id: i64) -> Book {
    Book {
        book_id: 0,
        title: seed.title.clone(),
        description: seed.description.clone(),
        release_date: seed.release_date,
        copies: seed.copies,
        price: seed.price,
        edition_type: seed.edition_type,
        age_restriction: seed.age_restriction,
        author_id,
    }
}

/// Map a 1-based seed position to the id inserted for it.
fn resolve(entity: &'static str, ids: &[i64], position: i64) -> Result<i64, ImportError> {
    usize::try_from(position)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|index| ids.get(index).copied())
        .ok_or(ImportError::UnknownReference { entity, position })
}
