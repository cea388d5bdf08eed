//! shopdesk CLI
//!
//! Command-line interface for seeding, importing and reporting on the
//! bookshop and product-shop databases.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands};
use commands::Context;
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let settings = shopdesk_lib::settings::load_settings();
    let ctx = Context {
        db_path: shopdesk_lib::settings::resolve_database_path(cli.db, &settings),
        datasets: shopdesk_lib::settings::resolve_dataset_dirs(cli.datasets, &settings),
    };
    log::debug!("database: {}", ctx.db_path.display());

    let result = match cli.command {
        Commands::Bookshop { report } => commands::bookshop::run_bookshop(&ctx, report),
        Commands::Productshop { action } => commands::productshop::run_productshop(&ctx, action),
        Commands::RunAll => commands::run_all::run_all(&ctx),
        Commands::Stats => commands::stats::run_stats(&ctx),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Messages are printed bare unless `verbose` is set. `RUST_LOG` overrides
/// the level chosen by the flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));

    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Error => writeln!(buf, "error: {}", record.args()),
            log::Level::Warn => writeln!(buf, "warning: {}", record.args()),
            _ => writeln!(buf, "{}", record.args()),
        });
    }
    builder.init();
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
