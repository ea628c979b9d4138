use crate::cli::commands::load_catalog;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};

/// Print technicians, or the accounts billable by one technician.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Catalog { tech } = cmd {
        let catalog = load_catalog(cfg)?;

        match tech {
            None => {
                let mut table = Table::new(vec![
                    Column::left("Technician"),
                    Column::left("Market"),
                    Column::left("Tech ID"),
                ]);
                for t in catalog.technicians() {
                    table.add_row(vec![t.name.clone(), t.market.clone(), t.tech_id.clone()]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
            Some(name) => {
                let technician = catalog.technician(name)?;
                println!("Accounts for {} ({}):\n", technician.name, technician.market);

                let mut table = Table::new(vec![
                    Column::left("Account"),
                    Column::left("Market"),
                    Column::left("Billing rules"),
                ]);
                for a in catalog.eligible_accounts(&technician) {
                    table.add_row(vec![a.name.clone(), a.market.clone(), a.rules.clone()]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        }
    }

    Ok(())
}
