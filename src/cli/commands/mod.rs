pub mod backup;
pub mod catalog;
pub mod config;
pub mod export;
pub mod history;
pub mod init;
pub mod item;
pub mod log;
pub mod number;
pub mod reset;
pub mod set;
pub mod show;

use crate::config::Config;
use crate::core::Catalog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Open the configured database (schema is brought up to date).
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    DbPool::new(&cfg.database)
}

/// Load the reference catalog named in the configuration.
pub(crate) fn load_catalog(cfg: &Config) -> AppResult<Catalog> {
    Catalog::resolve(cfg)
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// CLI indexes are 1-based.
pub(crate) fn to_zero_based(index: usize) -> Option<usize> {
    index.checked_sub(1)
}
