use crate::cli::commands::{open_pool, to_zero_based};
use crate::cli::parser::{Commands, ItemAction};
use crate::config::Config;
use crate::core::DraftStore;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::{ItemField, ItemInput};
use crate::ui::messages::{info, success};
use crate::utils::money::{format_money, parse_price};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Item { action } = cmd else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;
    let mut drafts = DraftStore::open(&pool)?;

    match action {
        ItemAction::Add { desc, price } => {
            let parsed = parse_price(price).ok_or_else(|| {
                AppError::ValidationRejected(format!("'{price}' is not a valid price"))
            })?;

            let mut input = ItemInput::new(desc, Some(parsed));
            let count = drafts.add_item(&mut input)?;

            let added = &drafts.draft().items[count - 1];
            success(format!(
                "Item #{count} added: {} {}",
                added.description,
                format_money(added.price)
            ));
            audit(
                &pool.conn,
                "item_add",
                &format!("#{count}"),
                &format!("{} {}", added.description, format_money(added.price)),
            );
        }

        ItemAction::Edit { index, desc, price } => {
            if desc.is_none() && price.is_none() {
                info("Nothing to edit. Use --desc and/or --price.");
                return Ok(());
            }

            let len = drafts.draft().items.len();
            let idx = to_zero_based(*index)
                .filter(|i| *i < len)
                .ok_or(AppError::OutOfRange { index: *index, len })?;

            let mut edits: Vec<(ItemField, &str)> = Vec::new();
            if let Some(d) = desc {
                edits.push((ItemField::Description, d.as_str()));
            }
            if let Some(p) = price {
                edits.push((ItemField::Price, p.as_str()));
            }
            drafts.update_item_fields(idx, &edits)?;

            let item = &drafts.draft().items[idx];
            success(format!(
                "Item #{index} updated: {} {}",
                item.description,
                format_money(item.price)
            ));
            audit(
                &pool.conn,
                "item_edit",
                &format!("#{index}"),
                &format!("{} {}", item.description, format_money(item.price)),
            );
        }

        ItemAction::Del { index } => {
            let removed = match to_zero_based(*index) {
                Some(idx) => drafts.remove_item(idx)?,
                None => None,
            };

            match removed {
                Some(item) => {
                    success(format!("Item #{index} deleted: {}", item.description));
                    audit(&pool.conn, "item_del", &format!("#{index}"), &item.description);
                }
                None => info(format!("No item #{index}, nothing deleted.")),
            }
        }
    }

    success(format!("Total: {}", format_money(drafts.compute_total())));
    Ok(())
}
