use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"));

/// Visible width of a string that may carry ANSI colour codes.
fn visible_len(s: &str) -> usize {
    ANSI_RE.replace_all(s, "").chars().count()
}

/// Colour of an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "item_add" | "set" => Colour::Green,
        "item_del" | "reset" | "history_del" | "history_clear" => Colour::Red,
        "item_edit" => Colour::Yellow,
        "export" | "number" => Colour::Cyan,
        "history_reload" => Colour::Blue,
        "backup" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// One row of the `log` table.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

const MAX_OP_WIDTH: usize = 40;

pub struct LogLogic;

impl LogLogic {
    pub fn entries(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::entries(pool)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        let labels: Vec<String> = entries
            .iter()
            .map(|e| {
                let color = color_for_operation(&e.operation);
                let mut label = color.paint(e.operation.as_str()).to_string();
                if !e.target.is_empty() {
                    let target: String = e.target.chars().take(MAX_OP_WIDTH).collect();
                    label.push_str(&format!(" ({target})"));
                }
                label
            })
            .collect();

        let op_w = labels
            .iter()
            .map(|l| visible_len(l))
            .max()
            .unwrap_or(0);

        println!("📜 Internal log:\n");

        for (entry, label) in entries.iter().zip(labels) {
            let padding = " ".repeat(op_w.saturating_sub(visible_len(&label)));
            println!(
                "{:>id_w$}: {} | {}{} => {}",
                entry.id,
                entry.date,
                label,
                padding,
                entry.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
