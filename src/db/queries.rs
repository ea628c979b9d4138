//! SQLite implementation of the storage traits.

use crate::db::migrate::DRAFT_KEY;
use crate::db::pool::DbPool;
use crate::db::store::{CounterStore, DraftSink, HistoryStore};
use crate::errors::{AppError, AppResult};
use crate::models::FinalizedInvoice;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::{OptionalExtension, Row, params};

impl DraftSink for DbPool {
    fn load_draft(&self) -> AppResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM store WHERE key = ?1",
                [DRAFT_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save_draft(&self, snapshot: &str) -> AppResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![DRAFT_KEY, snapshot, Local::now().to_rfc3339()])?;
        Ok(())
    }
}

impl CounterStore for DbPool {
    fn read_counter(&self, scope_key: &str) -> AppResult<Option<u64>> {
        let raw = self
            .conn
            .query_row(
                "SELECT value FROM sequence_counters WHERE scope_key = ?1",
                [scope_key],
                |row| row.get::<_, rusqlite::types::Value>(0),
            )
            .optional()?;

        match raw {
            None => Ok(None),
            Some(rusqlite::types::Value::Integer(v)) if v >= 0 => Ok(Some(v as u64)),
            Some(other) => Err(AppError::CorruptPersistedState(format!(
                "counter '{scope_key}' holds {other:?}"
            ))),
        }
    }

    fn write_counter(&self, scope_key: &str, value: u64) -> AppResult<()> {
        let value = i64::try_from(value)
            .map_err(|_| AppError::Other(format!("counter '{scope_key}' overflow")))?;

        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO sequence_counters (scope_key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![scope_key, value, Local::now().to_rfc3339()])?;
        Ok(())
    }

    fn counters(&self) -> AppResult<Vec<(String, u64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT scope_key, value FROM sequence_counters ORDER BY scope_key ASC")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, rusqlite::types::Value>(1)?,
            ))
        })?;

        let mut out = Vec::new();
        for r in rows {
            match r? {
                (key, rusqlite::types::Value::Integer(v)) if v >= 0 => out.push((key, v as u64)),
                (key, other) => {
                    warning(format!("Counter '{key}' holds {other:?}, skipped."));
                }
            }
        }
        Ok(out)
    }
}

/// Mapping DB → FinalizedInvoice. The payload column carries the full record.
fn map_invoice(row: &Row<'_>) -> rusqlite::Result<String> {
    row.get("payload")
}

fn decode_invoice(payload: &str) -> AppResult<FinalizedInvoice> {
    serde_json::from_str(payload).map_err(|e| AppError::CorruptPersistedState(e.to_string()))
}

impl HistoryStore for DbPool {
    fn append_invoice(&self, invoice: &FinalizedInvoice) -> AppResult<()> {
        if self.find_invoice(&invoice.invoice_number)?.is_some() {
            return Err(AppError::DuplicateInvoice(invoice.invoice_number.clone()));
        }

        let payload = serde_json::to_string(invoice)?;
        self.conn.execute(
            "INSERT INTO history (invoice_number, finalized_at, total, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                invoice.invoice_number,
                invoice.finalized_at.to_rfc3339(),
                invoice.total,
                payload
            ],
        )?;
        Ok(())
    }

    fn remove_invoice(&self, invoice_number: &str) -> AppResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM history WHERE invoice_number = ?1", [invoice_number])?;
        Ok(n > 0)
    }

    fn clear_invoices(&self) -> AppResult<usize> {
        Ok(self.conn.execute("DELETE FROM history", [])?)
    }

    fn find_invoice(&self, invoice_number: &str) -> AppResult<Option<FinalizedInvoice>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM history WHERE invoice_number = ?1",
                [invoice_number],
                map_invoice,
            )
            .optional()?;

        payload.as_deref().map(decode_invoice).transpose()
    }

    fn list_invoices(&self) -> AppResult<Vec<FinalizedInvoice>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM history ORDER BY id ASC")?;
        let rows = stmt.query_map([], map_invoice)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(decode_invoice(&r?)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceDraft, LineItem, Technician};

    fn invoice(number: &str) -> FinalizedInvoice {
        let draft = InvoiceDraft {
            technician: Some(Technician::new("Jane Doe", "BHM", "12")),
            items: vec![LineItem::committed("Rekey", 45.0).unwrap()],
            invoice_number: Some(number.to_string()),
            ..Default::default()
        };
        FinalizedInvoice::from_draft(&draft, Local::now()).unwrap()
    }

    #[test]
    fn draft_record_is_overwritten_in_place() {
        let pool = DbPool::in_memory().unwrap();
        assert_eq!(pool.load_draft().unwrap(), None);

        pool.save_draft("{\"po\":\"1\"}").unwrap();
        pool.save_draft("{\"po\":\"2\"}").unwrap();

        assert_eq!(pool.load_draft().unwrap().as_deref(), Some("{\"po\":\"2\"}"));
    }

    #[test]
    fn corrupt_counter_is_reported() {
        let pool = DbPool::in_memory().unwrap();
        pool.conn
            .execute(
                "INSERT INTO sequence_counters (scope_key, value, updated_at)
                 VALUES ('BHM:12', 'seven', '')",
                [],
            )
            .unwrap();

        assert!(matches!(
            pool.read_counter("BHM:12"),
            Err(AppError::CorruptPersistedState(_))
        ));
        assert_eq!(pool.read_counter("TPA:07").unwrap(), None);
    }

    #[test]
    fn counter_listing_skips_corrupt_rows() {
        let pool = DbPool::in_memory().unwrap();
        pool.write_counter("TPA:07", 3).unwrap();
        pool.conn
            .execute(
                "INSERT INTO sequence_counters (scope_key, value, updated_at)
                 VALUES ('BHM:12', 'seven', '')",
                [],
            )
            .unwrap();

        assert_eq!(pool.counters().unwrap(), vec![("TPA:07".to_string(), 3)]);
    }

    #[test]
    fn history_keeps_insertion_order_and_rejects_duplicates() {
        let pool = DbPool::in_memory().unwrap();
        pool.append_invoice(&invoice("BHM-12-0002")).unwrap();
        pool.append_invoice(&invoice("BHM-12-0001")).unwrap();

        let err = pool.append_invoice(&invoice("BHM-12-0001")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateInvoice(_)));

        let numbers: Vec<String> = pool
            .list_invoices()
            .unwrap()
            .into_iter()
            .map(|i| i.invoice_number)
            .collect();
        assert_eq!(numbers, ["BHM-12-0002", "BHM-12-0001"]);

        assert!(pool.remove_invoice("BHM-12-0002").unwrap());
        assert!(!pool.remove_invoice("BHM-12-0002").unwrap());
        assert_eq!(pool.clear_invoices().unwrap(), 1);
    }
}
