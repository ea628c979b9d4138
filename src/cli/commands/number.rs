use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{DraftStore, NumberingService};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Number { preview, counters } = cmd {
        let pool = open_pool(cfg)?;
        let numbering = NumberingService::new(&pool);

        if *preview {
            let drafts = DraftStore::open(&pool)?;
            match &drafts.draft().invoice_number {
                Some(n) => println!("{n}"),
                None => {
                    let next = numbering.preview_next(drafts.draft().technician.as_ref())?;
                    println!("{next}");
                    info("Preview only: the number is reserved at export time.");
                }
            }
        }

        if *counters {
            let rows = numbering.counters()?;
            if rows.is_empty() {
                info("No invoice numbered yet.");
            } else {
                let mut table = Table::new(vec![Column::left("Scope"), Column::right("Last")]);
                for (scope, value) in rows {
                    table.add_row(vec![scope, value.to_string()]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        }
    }

    Ok(())
}
