// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::ui::messages::{info, warning};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name used when no invoice number is known yet.
pub const DEFAULT_FILE_STEM: &str = "invoice";

/// `<invoice number>.<ext>`, or `invoice.<ext>` without a number.
/// Characters that are unsafe in file names are replaced with `_`.
pub fn export_file_name(invoice_number: Option<&str>, format: ExportFormat) -> String {
    let stem = invoice_number
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| {
            n.chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect::<String>()
        })
        .unwrap_or_else(|| DEFAULT_FILE_STEM.to_string());

    format!("{stem}.{}", format.extension())
}

/// Explicit `--file` wins; otherwise the derived name inside `export_dir`.
pub fn resolve_output_path(
    file: Option<&Path>,
    export_dir: &Path,
    invoice_number: Option<&str>,
    format: ExportFormat,
) -> PathBuf {
    match file {
        Some(f) => f.to_path_buf(),
        None => export_dir.join(export_file_name(invoice_number, format)),
    }
}

/// Check that a file can be created or overwritten, creating the parent
/// directory when needed.
///
/// - file missing → Ok
/// - file present and `force` → Ok
/// - file present and no `force` → ask the user.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled: existing file not overwritten".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_comes_from_invoice_number() {
        assert_eq!(
            export_file_name(Some("BHM-12-0001"), ExportFormat::Xlsx),
            "BHM-12-0001.xlsx"
        );
        assert_eq!(export_file_name(None, ExportFormat::Csv), "invoice.csv");
        assert_eq!(export_file_name(Some("  "), ExportFormat::Json), "invoice.json");
        assert_eq!(export_file_name(Some("A/B 1"), ExportFormat::Csv), "A_B_1.csv");
    }

    #[test]
    fn explicit_file_wins() {
        let dir = Path::new("/exports");
        assert_eq!(
            resolve_output_path(None, dir, Some("X-01-0001"), ExportFormat::Xlsx),
            PathBuf::from("/exports/X-01-0001.xlsx")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("/tmp/a.xlsx")), dir, None, ExportFormat::Xlsx),
            PathBuf::from("/tmp/a.xlsx")
        );
    }
}
