use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::core::DraftStore;
use crate::errors::AppResult;
use crate::models::InvoiceDraft;
use crate::ui::messages::header;
use crate::utils::money::format_money;
use crate::utils::table::{Column, Table};

const NOTES_WIDTH: usize = 60;

/// Render a draft (or a reloaded history entry) for the terminal.
pub fn render_draft(draft: &InvoiceDraft, sep: &str) -> String {
    let mut out = String::new();

    let dash = || "-".to_string();
    let number = draft.invoice_number.clone().unwrap_or_else(dash);
    let tech = draft
        .technician
        .as_ref()
        .map(|t| format!("{} ({}, #{})", t.name, t.market, t.tech_id))
        .unwrap_or_else(dash);
    let account = draft
        .account
        .as_ref()
        .map(|a| a.name.clone())
        .unwrap_or_else(dash);
    let po = if draft.purchase_order.is_empty() {
        dash()
    } else {
        draft.purchase_order.clone()
    };

    out.push_str(&format!("Invoice #   : {number}\n"));
    out.push_str(&format!("Technician  : {tech}\n"));
    out.push_str(&format!("Account     : {account}\n"));
    out.push_str(&format!("PO          : {po}\n"));

    if draft.notes.trim().is_empty() {
        out.push_str("Notes       : -\n");
    } else {
        let wrapped = textwrap::wrap(&draft.notes, NOTES_WIDTH);
        for (i, line) in wrapped.iter().enumerate() {
            let label = if i == 0 { "Notes       : " } else { "              " };
            out.push_str(&format!("{label}{line}\n"));
        }
    }
    out.push('\n');

    if draft.items.is_empty() {
        out.push_str("(no items)\n");
    } else {
        let mut table = Table::new(vec![
            Column::right("#"),
            Column::left("Description"),
            Column::right("Price"),
        ]);
        for (i, item) in draft.items.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                item.description.clone(),
                format_money(item.price),
            ]);
        }
        out.push_str(&table.render(sep));
    }

    out.push_str(&format!("\nTotal: {}\n", format_money(draft.total())));
    out
}

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let drafts = DraftStore::open(&pool)?;

    header("Current draft", &cfg.separator_char);
    print!("{}", render_draft(drafts.draft(), &cfg.separator_char));

    if let Some(rules) = drafts
        .draft()
        .account
        .as_ref()
        .map(|a| a.rules.as_str())
        .filter(|r| !r.is_empty())
    {
        println!("Billing rules: {rules}");
    }

    Ok(())
}
