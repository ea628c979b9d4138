// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{Cell, InvoiceSheet, RowKind};
use crate::export::{SHEET_NAME, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const MONEY_FORMAT: &str = "0.00";

/// Cell styles, one per row kind.
struct Styles {
    label: Format,
    text: Format,
    column_header: Format,
    item_text: Format,
    item_money: Format,
    total_label: Format,
    total_money: Format,
}

impl Styles {
    fn new() -> Self {
        let header_bg = Color::RGB(0x2F75B5);
        let band = Color::RGB(0xEAF3FB);

        Self {
            label: Format::new().set_bold(),
            text: Format::new().set_text_wrap(),
            column_header: Format::new()
                .set_bold()
                .set_font_color(Color::RGB(0xFFFFFF))
                .set_background_color(header_bg)
                .set_pattern(FormatPattern::Solid)
                .set_border(FormatBorder::Thin),
            item_text: Format::new()
                .set_background_color(band)
                .set_pattern(FormatPattern::Solid)
                .set_border(FormatBorder::Thin),
            item_money: Format::new()
                .set_num_format(MONEY_FORMAT)
                .set_align(FormatAlign::Right)
                .set_background_color(band)
                .set_pattern(FormatPattern::Solid)
                .set_border(FormatBorder::Thin),
            total_label: Format::new().set_bold().set_border(FormatBorder::Thin),
            total_money: Format::new()
                .set_bold()
                .set_num_format(MONEY_FORMAT)
                .set_align(FormatAlign::Right)
                .set_border(FormatBorder::Thin),
        }
    }

    fn for_cell(&self, kind: RowKind, col: usize) -> &Format {
        match (kind, col) {
            (RowKind::Header, 0) => &self.label,
            (RowKind::Header, _) => &self.text,
            (RowKind::ColumnHeader, _) => &self.column_header,
            (RowKind::Item, 0) => &self.item_text,
            (RowKind::Item, _) => &self.item_money,
            (RowKind::Total, 0) => &self.total_label,
            (RowKind::Total, _) => &self.total_money,
            (RowKind::Separator, _) => &self.text,
        }
    }
}

/// Lay the sheet out in a workbook whose first (only) worksheet is `Invoice`.
pub(crate) fn build_workbook(sheet: &InvoiceSheet) -> AppResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(to_io_app_error)?;

    let styles = Styles::new();
    let mut col_widths = [0usize; 2];

    for (row_index, row) in sheet.rows.iter().enumerate() {
        let r = row_index as u32;

        for (col, cell) in row.cells.iter().enumerate() {
            let c = col as u16;
            let fmt = styles.for_cell(row.kind, col);

            match cell {
                Cell::Text(s) => {
                    worksheet
                        .write_string_with_format(r, c, s, fmt)
                        .map_err(to_io_app_error)?;
                }
                Cell::Money(v) => {
                    worksheet
                        .write_number_with_format(r, c, *v, fmt)
                        .map_err(to_io_app_error)?;
                }
                Cell::Blank => {}
            }

            // notes may span lines: size on the longest one
            let rendered = cell.to_string();
            let width = rendered
                .lines()
                .map(UnicodeWidthStr::width)
                .max()
                .unwrap_or(0);
            col_widths[col] = col_widths[col].max(width);
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        let w = (*w).min(60);
        worksheet
            .set_column_width(c as u16, w as f64 + 2.0)
            .map_err(to_io_app_error)?;
    }

    Ok(workbook)
}

/// Write the invoice as an XLSX workbook.
pub(crate) fn export_xlsx(sheet: &InvoiceSheet, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = build_workbook(sheet)?;
    workbook.save(path).map_err(to_io_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn to_io_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::from(io::Error::other(e.to_string()))
}
