use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for techinvoice
/// CLI application to draft, number and export service invoices
#[derive(Parser)]
#[command(
    name = "techinvoice",
    version = env!("CARGO_PKG_VERSION"),
    about = "Field service invoicing CLI: draft invoices, number them per market and technician, export to XLSX/CSV",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// List technicians, or the accounts a technician can bill
    Catalog {
        #[arg(long = "tech", help = "Show accounts eligible for this technician")]
        tech: Option<String>,
    },

    /// Set header fields of the current draft
    Set {
        #[arg(long = "tech", conflicts_with = "clear_tech", help = "Technician name")]
        tech: Option<String>,

        #[arg(long = "account", conflicts_with = "clear_account", help = "Billing account name")]
        account: Option<String>,

        #[arg(long = "po", help = "Purchase order number")]
        po: Option<String>,

        #[arg(long = "notes", help = "Notes (work performed)")]
        notes: Option<String>,

        #[arg(long = "clear-tech", help = "Unselect the technician")]
        clear_tech: bool,

        #[arg(long = "clear-account", help = "Unselect the account")]
        clear_account: bool,
    },

    /// Add, edit or delete line items
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Show the current draft
    Show,

    /// Discard the current draft (sequence counters are kept)
    Reset {
        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// Inspect invoice numbering
    Number {
        #[arg(long = "preview", help = "Show the next number without reserving it")]
        preview: bool,

        #[arg(long = "counters", help = "List every sequence counter")]
        counters: bool,
    },

    /// Finalize the draft: assign its number, write the file, record it in history
    Export {
        #[arg(long, value_enum, help = "Output format (default from config)")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", help = "Output file (default: <number>.<ext> in export_dir)")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Browse or manage finalized invoices
    History {
        #[arg(long = "list", help = "List finalized invoices")]
        list: bool,

        #[arg(long = "show", value_name = "NUMBER", help = "Show one invoice")]
        show: Option<String>,

        #[arg(long = "del", value_name = "NUMBER", help = "Delete one invoice from history")]
        del: Option<String>,

        #[arg(long = "clear", help = "Delete every invoice from history")]
        clear: bool,

        #[arg(
            long = "reload",
            value_name = "NUMBER",
            help = "Copy an invoice into a new draft"
        )]
        reload: Option<String>,

        #[arg(
            long = "export",
            value_name = "NUMBER",
            help = "Write a finalized invoice to a file again"
        )]
        export: Option<String>,

        #[arg(long, value_enum, requires = "export")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", requires = "export")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Skip confirmations")]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Append a line item
    Add {
        /// Item description
        desc: String,

        /// Price (e.g. 45 or 45.00)
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// Edit an existing line item (1-based index)
    Edit {
        index: usize,

        #[arg(long = "desc")]
        desc: Option<String>,

        #[arg(long = "price", allow_hyphen_values = true)]
        price: Option<String>,
    },

    /// Delete a line item (1-based index)
    Del { index: usize },
}
