//! techinvoice library root.
//! Exposes the CLI parser, the high-level `run()` function and the
//! internal modules (models, storage, numbering, export).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Catalog { .. } => commands::catalog::handle(&cli.command, cfg),
        Commands::Set { .. } => commands::set::handle(&cli.command, cfg),
        Commands::Item { .. } => commands::item::handle(&cli.command, cfg),
        Commands::Show => commands::show::handle(cfg),
        Commands::Reset { .. } => commands::reset::handle(&cli.command, cfg),
        Commands::Number { .. } => commands::number::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::History { .. } => commands::history::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once per invocation
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
