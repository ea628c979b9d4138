//! History log of finalized invoices.

use crate::core::draft_store::DraftStore;
use crate::db::store::{DraftSink, HistoryStore};
use crate::errors::{AppError, AppResult};
use crate::models::FinalizedInvoice;

pub struct HistoryLog<H: HistoryStore> {
    store: H,
}

impl<H: HistoryStore> HistoryLog<H> {
    pub fn new(store: H) -> Self {
        Self { store }
    }

    /// Add a finalized invoice at the end. Existing entries are never touched;
    /// a number already present is refused.
    pub fn append(&mut self, invoice: &FinalizedInvoice) -> AppResult<()> {
        self.store.append_invoice(invoice)
    }

    /// Delete the entry with exactly this number. `false` if it was absent.
    pub fn remove(&mut self, invoice_number: &str) -> AppResult<bool> {
        self.store.remove_invoice(invoice_number)
    }

    /// Empty the log. Returns how many entries were deleted.
    pub fn clear(&mut self) -> AppResult<usize> {
        self.store.clear_invoices()
    }

    pub fn find(&self, invoice_number: &str) -> AppResult<Option<FinalizedInvoice>> {
        self.store.find_invoice(invoice_number)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> AppResult<Vec<FinalizedInvoice>> {
        self.store.list_invoices()
    }

    /// Copy a past invoice into a fresh, unnumbered live draft.
    pub fn reload_into<S: DraftSink>(
        &self,
        invoice_number: &str,
        drafts: &mut DraftStore<S>,
    ) -> AppResult<FinalizedInvoice> {
        let invoice = self
            .find(invoice_number)?
            .ok_or_else(|| AppError::InvoiceNotFound(invoice_number.to_string()))?;

        drafts.replace(invoice.to_draft())?;
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{InvoiceDraft, LineItem, Technician};
    use chrono::Local;

    fn finalized(number: &str, price: f64) -> FinalizedInvoice {
        let draft = InvoiceDraft {
            technician: Some(Technician::new("Jane Doe", "BHM", "12")),
            purchase_order: "PO-1".into(),
            items: vec![LineItem::committed("Rekey", price).unwrap()],
            invoice_number: Some(number.into()),
            ..Default::default()
        };
        FinalizedInvoice::from_draft(&draft, Local::now()).unwrap()
    }

    #[test]
    fn append_find_remove_clear() {
        let mem = MemoryStore::new();
        let mut log = HistoryLog::new(&mem);

        log.append(&finalized("BHM-12-0001", 45.0)).unwrap();
        log.append(&finalized("BHM-12-0002", 20.0)).unwrap();

        assert_eq!(log.find("BHM-12-0002").unwrap().unwrap().total, 20.0);
        assert!(log.find("BHM-12-0099").unwrap().is_none());

        assert!(!log.remove("BHM-12-0099").unwrap());
        assert!(log.remove("BHM-12-0001").unwrap());
        assert_eq!(log.entries().unwrap().len(), 1);

        assert_eq!(log.clear().unwrap(), 1);
        assert!(log.entries().unwrap().is_empty());
    }

    #[test]
    fn append_never_overwrites_an_entry() {
        let mem = MemoryStore::new();
        let mut log = HistoryLog::new(&mem);
        log.append(&finalized("BHM-12-0001", 45.0)).unwrap();

        assert!(matches!(
            log.append(&finalized("BHM-12-0001", 99.0)),
            Err(AppError::DuplicateInvoice(_))
        ));
        assert_eq!(log.find("BHM-12-0001").unwrap().unwrap().total, 45.0);
    }

    #[test]
    fn reload_copies_into_fresh_draft() {
        let mem = MemoryStore::new();
        let mut log = HistoryLog::new(&mem);
        let original = finalized("BHM-12-0001", 45.0);
        log.append(&original).unwrap();

        let mut drafts = DraftStore::open(&mem).unwrap();
        log.reload_into("BHM-12-0001", &mut drafts).unwrap();

        let draft = drafts.draft();
        assert_eq!(draft.invoice_number, None);
        assert_eq!(draft.purchase_order, "PO-1");
        assert_eq!(draft.items, original.items);

        // editing the reloaded draft leaves the history entry alone
        drafts.update_item(0, crate::models::ItemField::Price, "1").unwrap();
        assert_eq!(log.find("BHM-12-0001").unwrap().unwrap(), original);
    }

    #[test]
    fn reload_of_unknown_number_fails() {
        let mem = MemoryStore::new();
        let log = HistoryLog::new(&mem);
        let mut drafts = DraftStore::open(&mem).unwrap();

        assert!(matches!(
            log.reload_into("X-00-0001", &mut drafts),
            Err(AppError::InvoiceNotFound(_))
        ));
    }
}
