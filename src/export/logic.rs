// src/export/logic.rs

use crate::core::draft_store::DraftStore;
use crate::core::history::HistoryLog;
use crate::core::numbering::NumberingService;
use crate::db::store::{CounterStore, DraftSink, HistoryStore};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_writable, resolve_output_path};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::InvoiceSheet;
use crate::export::xlsx::export_xlsx;
use crate::models::{FinalizedInvoice, Technician};
use crate::ui::messages::{info, warning};
use chrono::Local;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// Explicit output file; derived from the invoice number when `None`.
    pub file: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub invoice: FinalizedInvoice,
    pub path: PathBuf,
    /// `true` when the number was assigned by this export, `false` when a
    /// number left on the draft by an earlier failed export was reused.
    pub newly_numbered: bool,
}

/// High-level export flow.
pub struct ExportLogic;

impl ExportLogic {
    /// Finalize the live draft:
    ///
    /// 1. a technician must be selected (`MissingSelection` otherwise);
    /// 2. the draft gets its number, committed and persisted on the draft,
    ///    unless it already carries one from a failed attempt; numbers
    ///    already present in history are never handed out again;
    /// 3. the invoice is rendered and written;
    /// 4. the record is appended to the history and the draft is reset.
    ///
    /// If writing fails the draft keeps its number, so retrying does not
    /// consume another one.
    pub fn finalize<S, C, H>(
        drafts: &mut DraftStore<S>,
        numbering: &mut NumberingService<C>,
        history: &mut HistoryLog<H>,
        request: &ExportRequest,
    ) -> AppResult<ExportOutcome>
    where
        S: DraftSink,
        C: CounterStore,
        H: HistoryStore,
    {
        let tech = drafts
            .draft()
            .technician
            .clone()
            .ok_or(AppError::MissingSelection)?;

        if drafts.draft().items.is_empty() {
            warning("Exporting an invoice without items.");
        }

        let pending = match drafts.draft().invoice_number.clone() {
            Some(n) if history.find(&n)?.is_some() => {
                warning(format!("Invoice number {n} is already in history, assigning a new one."));
                None
            }
            other => other,
        };

        let (number, newly_numbered) = match pending {
            Some(n) => {
                info(format!("Reusing invoice number {n}"));
                (n, false)
            }
            None => {
                let n = Self::next_free_number(numbering, history, &tech)?;
                drafts.assign_number(&n)?;
                (n, true)
            }
        };

        let invoice = FinalizedInvoice::from_draft(drafts.draft(), Local::now())?;

        let path = resolve_output_path(
            request.file.as_deref(),
            &request.export_dir,
            Some(&number),
            request.format,
        );
        ensure_writable(&path, request.force)?;
        write_invoice(&invoice, request.format, &path)?;

        history.append(&invoice)?;
        drafts.reset()?;

        Ok(ExportOutcome {
            invoice,
            path,
            newly_numbered,
        })
    }

    /// Next number of the technician's scope that is not already in
    /// history. Numbers skipped this way stay consumed.
    fn next_free_number<C, H>(
        numbering: &mut NumberingService<C>,
        history: &HistoryLog<H>,
        tech: &Technician,
    ) -> AppResult<String>
    where
        C: CounterStore,
        H: HistoryStore,
    {
        loop {
            let n = numbering.next_number(Some(tech))?;
            if history.find(&n)?.is_none() {
                return Ok(n);
            }
            warning(format!("Invoice number {n} is already in history, skipped."));
        }
    }

    /// Write an already finalized invoice again (history re-export).
    pub fn rewrite(
        invoice: &FinalizedInvoice,
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(path, force)?;
        write_invoice(invoice, format, path)
    }
}

fn write_invoice(invoice: &FinalizedInvoice, format: ExportFormat, path: &Path) -> AppResult<()> {
    let sheet = InvoiceSheet::render(&invoice.as_numbered_draft(), &invoice.invoice_number);

    match format {
        ExportFormat::Xlsx => export_xlsx(&sheet, path),
        ExportFormat::Csv => export_csv(&sheet, path),
        ExportFormat::Json => export_json(invoice, path),
    }
}
