use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;
use shopdesk_catalog::ProductShopDataset;
use shopdesk_import::{ImportStats, LogProgress};
use shopdesk_lib::productshop;

use crate::CliError;
use crate::cli_types::ProductshopAction;

use super::{Context, print_report};

pub(crate) fn run_productshop(ctx: &Context, action: ProductshopAction) -> Result<(), CliError> {
    let conn = ctx.open_db()?;

    match action {
        ProductshopAction::Import => {
            reimport(ctx, &conn)?;
        }
        ProductshopAction::ProductsInRange => {
            print_report(&productshop::products_in_range(&conn)?);
        }
        ProductshopAction::SoldProducts => print_report(&productshop::sold_products(&conn)?),
        ProductshopAction::CategoriesByProducts => {
            print_report(&productshop::categories_by_products_count(&conn)?);
        }
        ProductshopAction::UsersAndProducts => {
            print_report(&productshop::users_with_products(&conn)?);
        }
        ProductshopAction::Export { out } => export(&conn, &out)?,
    }

    Ok(())
}

/// Empty the product-shop tables and import the four fixture documents.
pub(crate) fn reimport(ctx: &Context, conn: &Connection) -> Result<ImportStats, CliError> {
    let dir = &ctx.datasets.productshop;
    let dataset = ProductShopDataset::load(dir).map_err(|e| CliError::fixture(e.to_string()))?;

    shopdesk_db::reset_productshop(conn)
        .map_err(|e| CliError::database(format!("Failed to reset product-shop tables: {}", e)))?;
    shopdesk_import::import_dataset(conn, &dataset, Some(&LogProgress::default()))
        .map_err(|e| CliError::import(format!("Failed to import {}: {}", dir.display(), e)))
}

fn export(conn: &Connection, out: &Path) -> Result<(), CliError> {
    let written = productshop::export_all(conn, out)?;

    log::info!(
        "{}",
        format!("Exported {} report(s)", written.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for path in &written {
        log::info!("  {}", path.display());
    }
    Ok(())
}
