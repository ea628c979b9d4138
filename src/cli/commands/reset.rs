use crate::cli::commands::{ask_confirmation, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::DraftStore;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reset { force } = cmd {
        let pool = open_pool(cfg)?;
        let mut drafts = DraftStore::open(&pool)?;

        if drafts.draft().is_empty() {
            info("Draft is already empty.");
            return Ok(());
        }

        if !*force && !ask_confirmation("Discard the current draft? This action is irreversible.") {
            info("Operation cancelled.");
            return Ok(());
        }

        let dropped = drafts.draft().invoice_number.clone();
        drafts.reset()?;

        if let Some(n) = &dropped {
            info(format!("Invoice number {n} will not be reused."));
        }
        success("Draft discarded.");
        audit(
            &pool.conn,
            "reset",
            dropped.as_deref().unwrap_or(""),
            "Draft discarded",
        );
    }

    Ok(())
}
