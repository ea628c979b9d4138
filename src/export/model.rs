// src/export/model.rs

use crate::models::InvoiceDraft;
use crate::utils::money::format_money;
use std::fmt;

/// Labels of the header block, in output order.
pub const HEADER_LABELS: [&str; 5] = ["Invoice Number", "Technician", "Account", "PO", "Notes"];

pub const COLUMN_HEADERS: [&str; 2] = ["Description", "Price"];

pub const TOTAL_LABEL: &str = "Total";

/// Every row of the sheet has this many columns.
pub const COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Money(f64),
    Blank,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Money(v) => f.write_str(&format_money(*v)),
            Cell::Blank => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Separator,
    ColumnHeader,
    Item,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub kind: RowKind,
    pub cells: [Cell; COLUMNS],
}

impl SheetRow {
    fn new(kind: RowKind, first: Cell, second: Cell) -> Self {
        Self {
            kind,
            cells: [first, second],
        }
    }

    fn separator() -> Self {
        Self::new(RowKind::Separator, Cell::Blank, Cell::Blank)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.to_string()).collect()
    }
}

/// Tabular projection of one invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSheet {
    pub rows: Vec<SheetRow>,
}

impl InvoiceSheet {
    /// Project a draft and its invoice number into rows:
    /// header block, blank row, `Description | Price`, one row per item in
    /// draft order, blank row, total. Pure and deterministic.
    pub fn render(draft: &InvoiceDraft, invoice_number: &str) -> Self {
        let text = |s: &str| Cell::Text(s.to_string());

        let header_values = [
            invoice_number.to_string(),
            draft
                .technician
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            draft
                .account
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            draft.purchase_order.clone(),
            draft.notes.clone(),
        ];

        let mut rows: Vec<SheetRow> = HEADER_LABELS
            .into_iter()
            .zip(header_values)
            .map(|(label, value)| SheetRow::new(RowKind::Header, text(label), Cell::Text(value)))
            .collect();

        rows.push(SheetRow::separator());
        rows.push(SheetRow::new(
            RowKind::ColumnHeader,
            text(COLUMN_HEADERS[0]),
            text(COLUMN_HEADERS[1]),
        ));

        for item in &draft.items {
            rows.push(SheetRow::new(
                RowKind::Item,
                text(&item.description),
                Cell::Money(item.price),
            ));
        }

        rows.push(SheetRow::separator());
        rows.push(SheetRow::new(
            RowKind::Total,
            text(TOTAL_LABEL),
            Cell::Money(draft.total()),
        ));

        Self { rows }
    }

    /// Plain string matrix, as written to CSV.
    pub fn to_table(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(SheetRow::to_strings).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, LineItem, Technician};

    fn draft() -> InvoiceDraft {
        InvoiceDraft {
            technician: Some(Technician::new("Jane Doe", "BHM", "12")),
            account: Some(Account::new("Sunrise Apartments", "Call first", "BHM")),
            purchase_order: "PO-9".into(),
            notes: "Rekeyed unit 4".into(),
            items: vec![
                LineItem::committed("Rekey", 45.0).unwrap(),
                LineItem::committed("Service fee", 25.0).unwrap(),
            ],
            invoice_number: None,
        }
    }

    #[test]
    fn rows_follow_the_declared_layout() {
        let table = InvoiceSheet::render(&draft(), "BHM-12-0001").to_table();

        let expected: Vec<Vec<&str>> = vec![
            vec!["Invoice Number", "BHM-12-0001"],
            vec!["Technician", "Jane Doe"],
            vec!["Account", "Sunrise Apartments"],
            vec!["PO", "PO-9"],
            vec!["Notes", "Rekeyed unit 4"],
            vec!["", ""],
            vec!["Description", "Price"],
            vec!["Rekey", "45.00"],
            vec!["Service fee", "25.00"],
            vec!["", ""],
            vec!["Total", "70.00"],
        ];
        assert_eq!(table, expected);
    }

    #[test]
    fn render_is_deterministic() {
        let d = draft();
        assert_eq!(
            InvoiceSheet::render(&d, "BHM-12-0001"),
            InvoiceSheet::render(&d, "BHM-12-0001")
        );
    }

    #[test]
    fn empty_draft_still_renders_a_zero_total() {
        let table = InvoiceSheet::render(&InvoiceDraft::default(), "").to_table();

        assert_eq!(table.len(), 9);
        assert_eq!(table[6], ["Description", "Price"]);
        assert_eq!(table[8], ["Total", "0.00"]);
    }
}
