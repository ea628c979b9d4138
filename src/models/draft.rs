//! The in-progress invoice and its editing rules.
//!
//! `InvoiceDraft` is plain data plus the mutation rules; persistence of every
//! change is layered on top by `core::draft_store::DraftStore`.

use crate::errors::{AppError, AppResult};
use crate::models::account::Account;
use crate::models::line_item::{ItemField, ItemInput, LineItem};
use crate::models::technician::Technician;
use crate::utils::money::coerce_price;
use serde::{Deserialize, Serialize};

/// Header field assignment. `None` empties the field.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderField {
    Technician(Option<Technician>),
    Account(Option<Account>),
    PurchaseOrder(String),
    Notes(String),
}

impl HeaderField {
    pub fn name(&self) -> &'static str {
        match self {
            HeaderField::Technician(_) => "tech",
            HeaderField::Account(_) => "account",
            HeaderField::PurchaseOrder(_) => "po",
            HeaderField::Notes(_) => "notes",
        }
    }
}

/// Side effects of a header assignment that the caller may want to report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderChange {
    /// Account dropped because it is not billable in the new technician's market.
    pub cleared_account: Option<Account>,
    /// Pending invoice number dropped because the numbering scope changed.
    pub dropped_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    #[serde(rename = "tech", default)]
    pub technician: Option<Technician>,
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(rename = "po", default)]
    pub purchase_order: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(rename = "invoiceNumber", default)]
    pub invoice_number: Option<String>,
}

impl InvoiceDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sum of all item prices. Always derived, never stored.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| i.price).sum()
    }

    pub fn set_header(&mut self, field: HeaderField) -> AppResult<HeaderChange> {
        let mut change = HeaderChange::default();

        match field {
            HeaderField::Technician(tech) => {
                let same_tech = self.technician.as_ref().map(|t| &t.tech_id)
                    == tech.as_ref().map(|t| &t.tech_id);

                if let Some(t) = &tech
                    && self.account.as_ref().is_some_and(|a| !a.is_eligible_for(t))
                {
                    change.cleared_account = self.account.take();
                }
                if !same_tech {
                    change.dropped_number = self.invoice_number.take();
                }
                self.technician = tech;
            }
            HeaderField::Account(account) => {
                if let (Some(acc), Some(tech)) = (&account, &self.technician)
                    && !acc.is_eligible_for(tech)
                {
                    return Err(AppError::IneligibleAccount {
                        account: acc.name.clone(),
                        market: tech.market.clone(),
                    });
                }
                self.account = account;
            }
            HeaderField::PurchaseOrder(po) => self.purchase_order = po.trim().to_string(),
            HeaderField::Notes(notes) => self.notes = notes,
        }

        Ok(change)
    }

    /// Append the staged item. On success the staging input is cleared and
    /// the new item count is returned; on failure nothing changes.
    pub fn add_item(&mut self, input: &mut ItemInput) -> AppResult<usize> {
        let price = input.price.unwrap_or(0.0);
        let item = LineItem::committed(&input.description, price)?;

        self.items.push(item);
        input.clear();
        Ok(self.items.len())
    }

    /// Replace one field of the item at `index` (0-based).
    ///
    /// Prices are coerced: text that is not a number becomes `0`, so a
    /// half-typed value never aborts an edit. Blank descriptions and
    /// negative prices are rejected.
    pub fn update_item(&mut self, index: usize, field: ItemField, value: &str) -> AppResult<()> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(AppError::OutOfRange { index, len })?;

        match field {
            ItemField::Description => {
                let desc = value.trim();
                if desc.is_empty() {
                    return Err(AppError::ValidationRejected(
                        "item description is empty".into(),
                    ));
                }
                item.description = desc.to_string();
            }
            ItemField::Price => {
                let price = coerce_price(value);
                if price < 0.0 {
                    return Err(AppError::ValidationRejected(format!(
                        "item price cannot be negative (got {price})"
                    )));
                }
                item.price = price;
            }
        }

        Ok(())
    }

    /// Remove the item at `index`; out-of-range indexes are ignored.
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Serialize the whole draft for persistence.
    pub fn snapshot(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot, reporting why it could not be read.
    pub fn try_restore(snapshot: &str) -> AppResult<Self> {
        serde_json::from_str(snapshot).map_err(|e| AppError::CorruptPersistedState(e.to_string()))
    }

    /// Parse a snapshot; a missing or unreadable one yields an empty draft.
    pub fn restore(snapshot: Option<&str>) -> Self {
        snapshot
            .and_then(|s| Self::try_restore(s).ok())
            .unwrap_or_default()
    }
}
