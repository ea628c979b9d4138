//! In-memory backend, used by unit tests and by callers that do not need
//! anything to survive the process.

use crate::db::store::{CounterStore, DraftSink, HistoryStore};
use crate::errors::{AppError, AppResult};
use crate::models::FinalizedInvoice;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    draft: RefCell<Option<String>>,
    counters: RefCell<BTreeMap<String, u64>>,
    history: RefCell<Vec<FinalizedInvoice>>,
    draft_writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the raw draft record, e.g. with a corrupt snapshot.
    pub fn with_raw_draft(raw: &str) -> Self {
        let store = Self::default();
        *store.draft.borrow_mut() = Some(raw.to_string());
        store
    }

    /// Number of draft writes performed so far.
    pub fn draft_writes(&self) -> usize {
        self.draft_writes.get()
    }

    pub fn raw_draft(&self) -> Option<String> {
        self.draft.borrow().clone()
    }
}

impl DraftSink for MemoryStore {
    fn load_draft(&self) -> AppResult<Option<String>> {
        Ok(self.draft.borrow().clone())
    }

    fn save_draft(&self, snapshot: &str) -> AppResult<()> {
        *self.draft.borrow_mut() = Some(snapshot.to_string());
        self.draft_writes.set(self.draft_writes.get() + 1);
        Ok(())
    }
}

impl CounterStore for MemoryStore {
    fn read_counter(&self, scope_key: &str) -> AppResult<Option<u64>> {
        Ok(self.counters.borrow().get(scope_key).copied())
    }

    fn write_counter(&self, scope_key: &str, value: u64) -> AppResult<()> {
        self.counters.borrow_mut().insert(scope_key.to_string(), value);
        Ok(())
    }

    fn counters(&self) -> AppResult<Vec<(String, u64)>> {
        Ok(self
            .counters
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect())
    }
}

impl HistoryStore for MemoryStore {
    fn append_invoice(&self, invoice: &FinalizedInvoice) -> AppResult<()> {
        let mut history = self.history.borrow_mut();
        if history
            .iter()
            .any(|i| i.invoice_number == invoice.invoice_number)
        {
            return Err(AppError::DuplicateInvoice(invoice.invoice_number.clone()));
        }
        history.push(invoice.clone());
        Ok(())
    }

    fn remove_invoice(&self, invoice_number: &str) -> AppResult<bool> {
        let mut history = self.history.borrow_mut();
        let before = history.len();
        history.retain(|i| i.invoice_number != invoice_number);
        Ok(history.len() != before)
    }

    fn clear_invoices(&self) -> AppResult<usize> {
        let mut history = self.history.borrow_mut();
        let n = history.len();
        history.clear();
        Ok(n)
    }

    fn find_invoice(&self, invoice_number: &str) -> AppResult<Option<FinalizedInvoice>> {
        Ok(self
            .history
            .borrow()
            .iter()
            .find(|i| i.invoice_number == invoice_number)
            .cloned())
    }

    fn list_invoices(&self) -> AppResult<Vec<FinalizedInvoice>> {
        Ok(self.history.borrow().clone())
    }
}
