//! Storage seams.
//!
//! The draft, the sequence counters and the history log are persisted
//! independently. Services receive the backend explicitly through these
//! traits; `DbPool` implements them on SQLite and `MemoryStore` in memory.
//!
//! All methods take `&self`: the process is single-threaded and one backend
//! is usually shared by several services at once.

use crate::errors::AppResult;
use crate::models::FinalizedInvoice;

/// Persistence of the single live draft, as an opaque snapshot.
pub trait DraftSink {
    fn load_draft(&self) -> AppResult<Option<String>>;
    fn save_draft(&self, snapshot: &str) -> AppResult<()>;
}

/// Keyed sequence counters.
pub trait CounterStore {
    /// Current value, `None` when the scope was never used.
    /// A stored value that cannot be read is `Err(CorruptPersistedState)`.
    fn read_counter(&self, scope_key: &str) -> AppResult<Option<u64>>;
    fn write_counter(&self, scope_key: &str, value: u64) -> AppResult<()>;
    /// Every readable scope with its value, ordered by key.
    fn counters(&self) -> AppResult<Vec<(String, u64)>>;
}

/// Append-only storage of finalized invoices, kept in insertion order.
pub trait HistoryStore {
    fn append_invoice(&self, invoice: &FinalizedInvoice) -> AppResult<()>;
    fn remove_invoice(&self, invoice_number: &str) -> AppResult<bool>;
    fn clear_invoices(&self) -> AppResult<usize>;
    fn find_invoice(&self, invoice_number: &str) -> AppResult<Option<FinalizedInvoice>>;
    fn list_invoices(&self) -> AppResult<Vec<FinalizedInvoice>>;
}

impl<T: DraftSink + ?Sized> DraftSink for &T {
    fn load_draft(&self) -> AppResult<Option<String>> {
        (**self).load_draft()
    }
    fn save_draft(&self, snapshot: &str) -> AppResult<()> {
        (**self).save_draft(snapshot)
    }
}

impl<T: CounterStore + ?Sized> CounterStore for &T {
    fn read_counter(&self, scope_key: &str) -> AppResult<Option<u64>> {
        (**self).read_counter(scope_key)
    }
    fn write_counter(&self, scope_key: &str, value: u64) -> AppResult<()> {
        (**self).write_counter(scope_key, value)
    }
    fn counters(&self) -> AppResult<Vec<(String, u64)>> {
        (**self).counters()
    }
}

impl<T: HistoryStore + ?Sized> HistoryStore for &T {
    fn append_invoice(&self, invoice: &FinalizedInvoice) -> AppResult<()> {
        (**self).append_invoice(invoice)
    }
    fn remove_invoice(&self, invoice_number: &str) -> AppResult<bool> {
        (**self).remove_invoice(invoice_number)
    }
    fn clear_invoices(&self) -> AppResult<usize> {
        (**self).clear_invoices()
    }
    fn find_invoice(&self, invoice_number: &str) -> AppResult<Option<FinalizedInvoice>> {
        (**self).find_invoice(invoice_number)
    }
    fn list_invoices(&self) -> AppResult<Vec<FinalizedInvoice>> {
        (**self).list_invoices()
    }
}
