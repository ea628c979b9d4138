use crate::models::{InvoiceDraft, LineItem};
use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::{Connection, Error, OptionalExtension, Result, params};

/// Key of the live draft record in the `store` table.
pub const DRAFT_KEY: &str = "invoiceDraft";

/// Key used by early releases, which persisted only the item list.
pub const LEGACY_ITEMS_KEY: &str = "invoiceItems";

const LEGACY_ITEMS_MIGRATION: &str = "20250301_0002_import_legacy_items";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Key/value records: the live draft (and, on old databases, the legacy item list).
fn create_store_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS store (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );
        "#,
    )
}

/// Invoice sequence counters, one row per `LOCATION:SUFFIX` scope.
/// Kept apart from `store` so that resetting a draft never touches them.
fn create_counters_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sequence_counters (
            scope_key   TEXT PRIMARY KEY,
            value       INTEGER NOT NULL DEFAULT 0 CHECK(value >= 0),
            updated_at  TEXT NOT NULL
        );
        "#,
    )
}

fn create_history_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS history (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            invoice_number  TEXT NOT NULL UNIQUE,
            finalized_at    TEXT NOT NULL,
            total           REAL NOT NULL,
            payload         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_history_finalized_at ON history(finalized_at);
        "#,
    )
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![Local::now().to_rfc3339(), version, message],
    )?;
    Ok(())
}

fn to_sql_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
    Error::ToSqlConversionFailure(Box::new(e))
}

/// Early releases stored only the item array under `invoiceItems`.
/// Fold it into a draft record, unless a draft already exists.
fn migrate_legacy_items(conn: &Connection) -> Result<()> {
    if migration_applied(conn, LEGACY_ITEMS_MIGRATION)? {
        return Ok(());
    }

    let legacy: Option<String> = conn
        .query_row(
            "SELECT value FROM store WHERE key = ?1",
            [LEGACY_ITEMS_KEY],
            |row| row.get(0),
        )
        .optional()?;

    let has_draft: bool = conn
        .query_row("SELECT 1 FROM store WHERE key = ?1", [DRAFT_KEY], |_| Ok(()))
        .optional()?
        .is_some();

    let message = match legacy {
        None => "No legacy item list found",
        Some(_) if has_draft => "Draft already present, legacy item list dropped",
        Some(raw) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
            Ok(items) => {
                let draft = InvoiceDraft {
                    items,
                    ..Default::default()
                };
                let snapshot = draft.snapshot().map_err(to_sql_error)?;
                conn.execute(
                    "INSERT INTO store (key, value, updated_at) VALUES (?1, ?2, ?3)",
                    params![DRAFT_KEY, snapshot, Local::now().to_rfc3339()],
                )?;
                success(format!(
                    "Imported {} item(s) from the legacy item list.",
                    draft.items.len()
                ));
                "Imported legacy item list into the draft"
            }
            Err(e) => {
                warning(format!("Legacy item list is unreadable, discarded: {e}"));
                "Legacy item list unreadable, discarded"
            }
        },
    };

    conn.execute("DELETE FROM store WHERE key = ?1", [LEGACY_ITEMS_KEY])?;
    mark_applied(conn, LEGACY_ITEMS_MIGRATION, message)?;
    Ok(())
}

/// Public entry point: create missing tables and run all pending migrations.
///
/// Called by `db::initialize::init_db()` and every time a pool is opened.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let fresh = !table_exists(conn, "store")?;

    create_store_table(conn)?;
    create_counters_table(conn)?;
    create_history_table(conn)?;

    if fresh {
        success("Created invoice tables.");
    }

    migrate_legacy_items(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_items_become_a_draft_once() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_log_table(&conn).unwrap();
        create_store_table(&conn).unwrap();
        conn.execute(
            "INSERT INTO store (key, value, updated_at) VALUES (?1, ?2, '')",
            params![LEGACY_ITEMS_KEY, r#"[{"desc":"Rekey","price":45.0}]"#],
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let raw: String = conn
            .query_row("SELECT value FROM store WHERE key = ?1", [DRAFT_KEY], |r| r.get(0))
            .unwrap();
        let draft = InvoiceDraft::try_restore(&raw).unwrap();
        assert_eq!(draft.items, vec![LineItem::committed("Rekey", 45.0).unwrap()]);

        let legacy_left: i64 = conn
            .query_row("SELECT COUNT(*) FROM store WHERE key = ?1", [LEGACY_ITEMS_KEY], |r| r.get(0))
            .unwrap();
        assert_eq!(legacy_left, 0);
        assert!(migration_applied(&conn, LEGACY_ITEMS_MIGRATION).unwrap());
    }
}
