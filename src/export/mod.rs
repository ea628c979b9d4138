// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;
pub mod model;
mod xlsx;

pub use fs_utils::{export_file_name, resolve_output_path};
pub use logic::{ExportLogic, ExportOutcome, ExportRequest};
pub use model::{Cell, InvoiceSheet, RowKind, SheetRow};

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Name of the worksheet that carries the invoice.
pub const SHEET_NAME: &str = "Invoice";

/// Common completion message for every writer.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Parse a format name as written in the configuration file.
    pub fn from_name(name: &str) -> AppResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidExportFormat(other.to_string())),
        }
    }
}
