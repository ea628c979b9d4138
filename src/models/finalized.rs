use crate::errors::{AppError, AppResult};
use crate::models::account::Account;
use crate::models::draft::InvoiceDraft;
use crate::models::line_item::LineItem;
use crate::models::technician::Technician;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Immutable record of an exported invoice, as kept in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedInvoice {
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: String,
    #[serde(rename = "tech")]
    pub technician: Technician,
    pub account: Option<Account>,
    #[serde(rename = "po")]
    pub purchase_order: String,
    pub notes: String,
    pub items: Vec<LineItem>,
    pub total: f64,
    #[serde(rename = "finalizedAt")]
    pub finalized_at: DateTime<Local>,
}

impl FinalizedInvoice {
    /// Freeze a numbered draft.
    pub fn from_draft(draft: &InvoiceDraft, finalized_at: DateTime<Local>) -> AppResult<Self> {
        let technician = draft.technician.clone().ok_or(AppError::MissingSelection)?;
        let invoice_number = draft
            .invoice_number
            .clone()
            .ok_or_else(|| AppError::Other("draft has no invoice number".into()))?;

        Ok(Self {
            invoice_number,
            technician,
            account: draft.account.clone(),
            purchase_order: draft.purchase_order.clone(),
            notes: draft.notes.clone(),
            items: draft.items.clone(),
            total: draft.total(),
            finalized_at,
        })
    }

    /// Copy header and items into a fresh, unnumbered draft.
    pub fn to_draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            technician: Some(self.technician.clone()),
            account: self.account.clone(),
            purchase_order: self.purchase_order.clone(),
            notes: self.notes.clone(),
            items: self.items.clone(),
            invoice_number: None,
        }
    }

    /// The draft as it was at export time, number included.
    pub fn as_numbered_draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: Some(self.invoice_number.clone()),
            ..self.to_draft()
        }
    }
}
