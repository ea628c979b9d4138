//! The live draft plus write-through persistence.
//!
//! Every successful mutation writes the full snapshot through the
//! `DraftSink` before returning, so the stored record never lags behind the
//! in-memory draft. Rejected operations write nothing.

use crate::db::store::DraftSink;
use crate::errors::AppResult;
use crate::models::{HeaderChange, HeaderField, InvoiceDraft, ItemField, ItemInput, LineItem};
use crate::ui::messages::warning;

pub struct DraftStore<S: DraftSink> {
    sink: S,
    draft: InvoiceDraft,
}

impl<S: DraftSink> DraftStore<S> {
    /// Restore the persisted draft. A missing record gives an empty draft;
    /// an unreadable one is discarded (and overwritten) with a warning.
    pub fn open(sink: S) -> AppResult<Self> {
        let raw = sink.load_draft()?;

        let mut store = Self {
            sink,
            draft: InvoiceDraft::default(),
        };

        if let Some(raw) = raw {
            match InvoiceDraft::try_restore(&raw) {
                Ok(draft) => store.draft = draft,
                Err(e) => {
                    warning(format!("{e}. Starting from an empty draft."));
                    store.persist()?;
                }
            }
        }

        Ok(store)
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn compute_total(&self) -> f64 {
        self.draft.total()
    }

    pub fn set_header_field(&mut self, field: HeaderField) -> AppResult<HeaderChange> {
        let change = self.draft.set_header(field)?;
        self.persist()?;
        Ok(change)
    }

    /// Apply several header fields as one change: if any is rejected the
    /// draft is left as it was and nothing is written.
    pub fn set_header_fields(&mut self, fields: Vec<HeaderField>) -> AppResult<Vec<HeaderChange>> {
        let mut next = self.draft.clone();
        let changes = fields
            .into_iter()
            .map(|f| next.set_header(f))
            .collect::<AppResult<Vec<_>>>()?;
        self.replace(next)?;
        Ok(changes)
    }

    pub fn add_item(&mut self, input: &mut ItemInput) -> AppResult<usize> {
        let count = self.draft.add_item(input)?;
        self.persist()?;
        Ok(count)
    }

    pub fn update_item(&mut self, index: usize, field: ItemField, value: &str) -> AppResult<()> {
        self.draft.update_item(index, field, value)?;
        self.persist()
    }

    /// Edit several fields of one item, all or nothing.
    pub fn update_item_fields(&mut self, index: usize, edits: &[(ItemField, &str)]) -> AppResult<()> {
        let mut next = self.draft.clone();
        for (field, value) in edits {
            next.update_item(index, *field, value)?;
        }
        self.replace(next)
    }

    /// `Ok(None)` when `index` is out of range; nothing is written then.
    pub fn remove_item(&mut self, index: usize) -> AppResult<Option<LineItem>> {
        let removed = self.draft.remove_item(index);
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn snapshot(&self) -> AppResult<String> {
        self.draft.snapshot()
    }

    /// Replace the live draft with a snapshot (empty if missing or unreadable).
    pub fn restore(&mut self, snapshot: Option<&str>) -> AppResult<()> {
        self.replace(InvoiceDraft::restore(snapshot))
    }

    /// Record the number assigned to the live draft, before it is exported.
    pub fn assign_number(&mut self, number: &str) -> AppResult<()> {
        self.draft.invoice_number = Some(number.to_string());
        self.persist()
    }

    pub fn replace(&mut self, draft: InvoiceDraft) -> AppResult<()> {
        self.draft = draft;
        self.persist()
    }

    /// Start over with an empty draft. Sequence counters are not touched.
    pub fn reset(&mut self) -> AppResult<()> {
        self.replace(InvoiceDraft::default())
    }

    fn persist(&self) -> AppResult<()> {
        self.sink.save_draft(&self.draft.snapshot()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::errors::AppError;
    use crate::models::{Account, Technician};

    #[test]
    fn every_mutation_is_written_through() {
        let mem = MemoryStore::new();
        let mut store = DraftStore::open(&mem).unwrap();

        store
            .set_header_field(HeaderField::Technician(Some(Technician::new(
                "Jane Doe", "BHM", "12",
            ))))
            .unwrap();
        store
            .add_item(&mut ItemInput::new("Rekey", Some(45.0)))
            .unwrap();
        store.update_item(0, ItemField::Price, "50").unwrap();

        assert_eq!(mem.draft_writes(), 3);

        let reopened = DraftStore::open(&mem).unwrap();
        assert_eq!(reopened.draft(), store.draft());
        assert_eq!(reopened.compute_total(), 50.0);
    }

    #[test]
    fn rejected_operations_do_not_write() {
        let mem = MemoryStore::new();
        let mut store = DraftStore::open(&mem).unwrap();
        store.add_item(&mut ItemInput::new("a", Some(1.0))).unwrap();
        store.add_item(&mut ItemInput::new("b", Some(2.0))).unwrap();
        let writes = mem.draft_writes();

        assert!(store.add_item(&mut ItemInput::new("", Some(10.0))).is_err());
        assert!(store.add_item(&mut ItemInput::new("x", None)).is_err());
        assert_eq!(store.remove_item(5).unwrap(), None);
        assert!(matches!(
            store.update_item(9, ItemField::Description, "z"),
            Err(AppError::OutOfRange { .. })
        ));

        assert_eq!(store.draft().items.len(), 2);
        assert_eq!(mem.draft_writes(), writes);
    }

    #[test]
    fn rejected_multi_field_edits_leave_draft_untouched() {
        let mem = MemoryStore::new();
        let mut store = DraftStore::open(&mem).unwrap();
        store
            .set_header_field(HeaderField::Technician(Some(Technician::new(
                "Jane Doe", "BHM", "12",
            ))))
            .unwrap();
        store
            .set_header_field(HeaderField::Account(Some(Account::new(
                "Sunrise Apartments",
                "",
                "BHM",
            ))))
            .unwrap();
        store.add_item(&mut ItemInput::new("Rekey", Some(45.0))).unwrap();
        let before = store.draft().clone();
        let writes = mem.draft_writes();

        let err = store
            .update_item_fields(
                0,
                &[(ItemField::Description, "CHANGED"), (ItemField::Price, "-3")],
            )
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationRejected(_)));

        // the account would be cleared by the technician, then re-set and refused
        let err = store
            .set_header_fields(vec![
                HeaderField::Technician(Some(Technician::new("John Smith", "TPA", "07"))),
                HeaderField::Account(Some(Account::new("Sunrise Apartments", "", "BHM"))),
            ])
            .unwrap_err();
        assert!(matches!(err, AppError::IneligibleAccount { .. }));

        assert_eq!(store.draft(), &before);
        assert_eq!(mem.draft_writes(), writes);

        store
            .update_item_fields(0, &[(ItemField::Description, "Rekey front"), (ItemField::Price, "50")])
            .unwrap();
        assert_eq!(store.draft().items[0].description, "Rekey front");
        assert_eq!(mem.draft_writes(), writes + 1);
    }

    #[test]
    fn corrupt_record_is_replaced_by_empty_draft() {
        let mem = MemoryStore::with_raw_draft("{\"items\": \"nope\"");
        let store = DraftStore::open(&mem).unwrap();

        assert!(store.draft().is_empty());
        let raw = mem.raw_draft().unwrap();
        assert!(InvoiceDraft::try_restore(&raw).unwrap().is_empty());
    }

    #[test]
    fn restore_replaces_live_draft() {
        let mem = MemoryStore::new();
        let mut store = DraftStore::open(&mem).unwrap();
        store.add_item(&mut ItemInput::new("a", Some(1.0))).unwrap();
        let snap = store.snapshot().unwrap();

        store.reset().unwrap();
        assert!(store.draft().is_empty());

        store.restore(Some(&snap)).unwrap();
        assert_eq!(store.draft().items.len(), 1);

        store.restore(Some("garbage")).unwrap();
        assert!(store.draft().is_empty());
    }
}
