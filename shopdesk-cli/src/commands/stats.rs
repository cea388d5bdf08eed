use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::Context;

pub(crate) fn run_stats(ctx: &Context) -> Result<(), CliError> {
    if !ctx.db_path.exists() {
        log::warn!("No database found at {}", ctx.db_path.display());
        log::info!("Run 'shopdesk run-all' to create one.");
        return Ok(());
    }

    let conn = ctx.open_db()?;
    let stats = shopdesk_db::shop_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query stats: {}", e)))?;

    log::info!(
        "{}",
        "Shop Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", ctx.db_path.display());
    crate::log_blank();
    log::info!("  Bookshop");
    log::info!("    Authors:          {:>8}", stats.authors);
    log::info!("    Books:            {:>8}", stats.books);
    log::info!("    Categories:       {:>8}", stats.categories);
    log::info!("    Book categories:  {:>8}", stats.book_categories);
    crate::log_blank();
    log::info!("  Product shop");
    log::info!("    Users:            {:>8}", stats.users);
    log::info!(
        "    Products:         {:>8} ({} sold)",
        stats.products,
        stats.products_sold,
    );
    log::info!("    Categories:       {:>8}", stats.product_categories);
    log::info!("    Category links:   {:>8}", stats.category_products);

    Ok(())
}
