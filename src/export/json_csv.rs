// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::InvoiceSheet;
use crate::export::notify_export_success;
use crate::models::FinalizedInvoice;
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Export the finalized record as pretty-printed JSON.
pub(crate) fn export_json(invoice: &FinalizedInvoice, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(invoice)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Write the row matrix to any CSV sink.
pub(crate) fn write_csv<W: Write>(sheet: &InvoiceSheet, out: W) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);

    for row in sheet.to_table() {
        wtr.write_record(&row)
            .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export the row matrix as CSV.
pub(crate) fn export_csv(sheet: &InvoiceSheet, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    write_csv(sheet, File::create(path)?)?;

    notify_export_success("CSV", path);
    Ok(())
}
