use crate::cli::commands::export::build_request;
use crate::cli::commands::show::render_draft;
use crate::cli::commands::{ask_confirmation, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{DraftStore, HistoryLog};
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportLogic, resolve_output_path};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::money::format_money;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::History {
        list: _,
        show,
        del,
        clear,
        reload,
        export,
        format,
        file,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;
    let mut history = HistoryLog::new(&pool);

    if let Some(number) = show {
        let invoice = history
            .find(number)?
            .ok_or_else(|| AppError::InvoiceNotFound(number.clone()))?;

        header(
            format!(
                "Invoice {} ({})",
                invoice.invoice_number,
                invoice.finalized_at.format("%Y-%m-%d %H:%M")
            ),
            &cfg.separator_char,
        );
        print!(
            "{}",
            render_draft(&invoice.as_numbered_draft(), &cfg.separator_char)
        );
        return Ok(());
    }

    if let Some(number) = reload {
        let mut drafts = DraftStore::open(&pool)?;
        if !drafts.draft().is_empty()
            && !*force
            && !ask_confirmation("The current draft will be replaced.")
        {
            info("Operation cancelled.");
            return Ok(());
        }

        history.reload_into(number, &mut drafts)?;
        success(format!(
            "Invoice {number} copied into a new draft ({} items, total {}).",
            drafts.draft().items.len(),
            format_money(drafts.compute_total())
        ));
        info("The draft will receive a new number when exported.");
        audit(&pool.conn, "history_reload", number, "Draft replaced from history");
        return Ok(());
    }

    if let Some(number) = export {
        let invoice = history
            .find(number)?
            .ok_or_else(|| AppError::InvoiceNotFound(number.clone()))?;

        let request = build_request(*format, file.as_deref(), *force, cfg)?;
        let path = resolve_output_path(
            request.file.as_deref(),
            &request.export_dir,
            Some(&invoice.invoice_number),
            request.format,
        );

        ExportLogic::rewrite(&invoice, request.format, &path, request.force)?;
        audit(
            &pool.conn,
            "history_export",
            number,
            &format!("{} -> {}", request.format.as_str(), path.display()),
        );
        return Ok(());
    }

    if let Some(number) = del {
        if !*force && !ask_confirmation(&format!("Delete invoice {number} from history?")) {
            info("Operation cancelled.");
            return Ok(());
        }

        if history.remove(number)? {
            success(format!("Invoice {number} deleted from history."));
            audit(&pool.conn, "history_del", number, "Removed from history");
        } else {
            warning(format!("Invoice {number} not found in history."));
        }
        return Ok(());
    }

    if *clear {
        if !*force && !ask_confirmation("Delete every invoice from history? Counters are kept.") {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = history.clear()?;
        success(format!("{removed} invoice(s) deleted from history."));
        audit(
            &pool.conn,
            "history_clear",
            "",
            &format!("{removed} entries removed"),
        );
        return Ok(());
    }

    // listing is also the default action
    let entries = history.entries()?;
    if entries.is_empty() {
        info("No finalized invoices.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("Number"),
        Column::left("Finalized"),
        Column::left("Technician"),
        Column::left("Account"),
        Column::right("Items"),
        Column::right("Total"),
    ]);
    for inv in &entries {
        table.add_row(vec![
            inv.invoice_number.clone(),
            inv.finalized_at.format("%Y-%m-%d %H:%M").to_string(),
            inv.technician.name.clone(),
            inv.account.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            inv.items.len().to_string(),
            format_money(inv.total),
        ]);
    }
    print!("{}", table.render(&cfg.separator_char));

    Ok(())
}
