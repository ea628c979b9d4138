use crate::cli::commands::{load_catalog, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::DraftStore;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::models::HeaderField;
use crate::ui::messages::{info, success, warning};

/// Set header fields of the live draft. Fields are applied in a fixed
/// order (technician first) so that account eligibility is checked against
/// the technician given in the same call. A rejected field rejects them all.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Set {
        tech,
        account,
        po,
        notes,
        clear_tech,
        clear_account,
    } = cmd
    {
        let catalog = load_catalog(cfg)?;

        let mut fields: Vec<HeaderField> = Vec::new();

        if *clear_tech {
            fields.push(HeaderField::Technician(None));
        } else if let Some(name) = tech {
            fields.push(HeaderField::Technician(Some(catalog.technician(name)?)));
        }

        if *clear_account {
            fields.push(HeaderField::Account(None));
        } else if let Some(name) = account {
            fields.push(HeaderField::Account(Some(catalog.account(name)?)));
        }

        if let Some(po) = po {
            fields.push(HeaderField::PurchaseOrder(po.clone()));
        }
        if let Some(notes) = notes {
            fields.push(HeaderField::Notes(notes.clone()));
        }

        if fields.is_empty() {
            info("Nothing to set. Use --tech, --account, --po or --notes.");
            return Ok(());
        }

        let pool = open_pool(cfg)?;
        let mut drafts = DraftStore::open(&pool)?;

        let names: Vec<&'static str> = fields.iter().map(HeaderField::name).collect();
        let changes = drafts.set_header_fields(fields)?;

        for (name, change) in names.into_iter().zip(changes) {
            if let Some(acc) = change.cleared_account {
                warning(format!(
                    "Account '{}' is not available in this market and was cleared.",
                    acc.name
                ));
            }
            if let Some(n) = change.dropped_number {
                warning(format!("Pending invoice number {n} dropped (technician changed)."));
            }

            let draft = drafts.draft();
            let value = match name {
                "tech" => draft
                    .technician
                    .as_ref()
                    .map(|t| format!("{} ({})", t.name, t.market))
                    .unwrap_or_else(|| "(none)".into()),
                "account" => draft
                    .account
                    .as_ref()
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| "(none)".into()),
                "po" => draft.purchase_order.clone(),
                _ => format!("{} chars", draft.notes.chars().count()),
            };

            success(format!("{name} set: {value}"));
            audit(&pool.conn, "set", name, &value);

            // billing rules are shown whenever an account is picked
            if name == "account"
                && let Some(acc) = &drafts.draft().account
                && !acc.rules.is_empty()
            {
                info(format!("Billing rules: {}", acc.rules));
            }
        }
    }

    Ok(())
}
