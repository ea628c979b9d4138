//! Unified application error type.
//! Every layer (models, core, db, export, cli) returns `AppError`, so a
//! failure can travel from the store up to `main` with a single `?`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Draft editing
    // ---------------------------
    #[error("Rejected: {0}")]
    ValidationRejected(String),

    #[error("No technician selected")]
    MissingSelection,

    #[error("Item #{index} does not exist (draft has {len} items)")]
    OutOfRange { index: usize, len: usize },

    #[error("Persisted state is unreadable: {0}")]
    CorruptPersistedState(String),

    // ---------------------------
    // Reference catalog
    // ---------------------------
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Unknown technician: {0}")]
    UnknownTechnician(String),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Account '{account}' is not available in market {market}")]
    IneligibleAccount { account: String, market: String },

    // ---------------------------
    // History
    // ---------------------------
    #[error("Invoice {0} not found in history")]
    InvoiceNotFound(String),

    #[error("Invoice {0} already exists in history")]
    DuplicateInvoice(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True when the failure happened while reading or writing storage,
    /// so the last change may not have been saved.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, AppError::Db(_) | AppError::Io(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_errors_hint_at_unsaved_state() {
        assert!(AppError::from(io::Error::other("disk full")).is_storage_failure());
        assert!(AppError::Db(rusqlite::Error::InvalidQuery).is_storage_failure());
        assert!(!AppError::UnknownTechnician("Nobody".into()).is_storage_failure());
        assert!(!AppError::Catalog("bad file".into()).is_storage_failure());
        assert!(!AppError::Config("bad yaml".into()).is_storage_failure());
    }
}
