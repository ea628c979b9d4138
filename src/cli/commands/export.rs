use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{DraftStore, HistoryLog, NumberingService};
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic, ExportRequest};
use crate::ui::messages::{info, success};
use crate::utils::money::format_money;
use crate::utils::path::{expand_tilde, resolve_against};
use std::env;

/// Build the request shared by `export` and `history --export`:
/// format falls back to the configured default, `--file` is resolved
/// against the working directory.
pub(crate) fn build_request(
    format: Option<ExportFormat>,
    file: Option<&str>,
    force: bool,
    cfg: &Config,
) -> AppResult<ExportRequest> {
    let format = match format {
        Some(f) => f,
        None => ExportFormat::from_name(&cfg.default_format)?,
    };
    let cwd = env::current_dir()?;

    Ok(ExportRequest {
        format,
        file: file.map(|f| resolve_against(f, &cwd)),
        export_dir: expand_tilde(&cfg.export_dir),
        force,
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export { format, file, force } = cmd {
        let request = build_request(*format, file.as_deref(), *force, cfg)?;

        let pool = open_pool(cfg)?;
        let mut drafts = DraftStore::open(&pool)?;
        let mut numbering = NumberingService::new(&pool);
        let mut history = HistoryLog::new(&pool);

        let outcome = ExportLogic::finalize(&mut drafts, &mut numbering, &mut history, &request)?;
        let number = &outcome.invoice.invoice_number;

        if outcome.newly_numbered {
            info(format!("Invoice number assigned: {number}"));
        }
        success(format!(
            "Invoice {number} finalized, total {}",
            format_money(outcome.invoice.total)
        ));
        audit(
            &pool.conn,
            "export",
            number,
            &format!(
                "{} -> {}",
                request.format.as_str(),
                outcome.path.display()
            ),
        );
    }

    Ok(())
}
