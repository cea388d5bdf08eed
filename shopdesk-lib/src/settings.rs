//! Shared application settings (database path, dataset directories).
//!
//! The settings file lives at `~/.config/shopdesk/settings.toml`:
//!
//! ```toml
//! [database]
//! path = "/var/lib/shopdesk/shop.db"
//!
//! [datasets]
//! bookshop = "/data/bookshop"
//! productshop = "/data/productshop"
//! ```
//!
//! Every value is optional. Resolution goes CLI flag, then settings file,
//! then the built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub datasets: DatasetSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSettings {
    pub bookshop: Option<PathBuf>,
    pub productshop: Option<PathBuf>,
}

/// Resolved fixture directories for both shops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetDirs {
    pub bookshop: PathBuf,
    pub productshop: PathBuf,
}

impl DatasetDirs {
    /// The `bookshop/` and `productshop/` subdirectories of `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            bookshop: root.join("bookshop"),
            productshop: root.join("productshop"),
        }
    }
}

/// Canonical path to the settings file: `~/.config/shopdesk/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("shopdesk").join("settings.toml")
}

/// Load the settings file, falling back to defaults when it is missing.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`. A missing file yields defaults; a malformed one
/// is reported and ignored.
pub fn load_settings_from(path: &Path) -> Settings {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return Settings::default();
    };
    match toml::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

/// Default database location: `~/.cache/shopdesk/shopdesk.db`.
pub fn default_database_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("shopdesk")
        .join("shopdesk.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `database.path` in `settings.toml`
/// 3. [`default_database_path`]
pub fn resolve_database_path(cli_override: Option<PathBuf>, settings: &Settings) -> PathBuf {
    cli_override
        .or_else(|| settings.database.path.clone())
        .unwrap_or_else(default_database_path)
}

/// Resolve both dataset directories. A CLI root wins for both shops; otherwise
/// each shop uses its settings entry or `./datasets/<shop>`.
pub fn resolve_dataset_dirs(cli_root: Option<PathBuf>, settings: &Settings) -> DatasetDirs {
    if let Some(root) = cli_root {
        return DatasetDirs::under(&root);
    }
    let defaults = DatasetDirs::under(Path::new("datasets"));
    DatasetDirs {
        bookshop: settings
            .datasets
            .bookshop
            .clone()
            .unwrap_or(defaults.bookshop),
        productshop: settings
            .datasets
            .productshop
            .clone()
            .unwrap_or(defaults.productshop),
    }
}

