use crate::errors::{AppError, AppResult};
use crate::utils::money::round2;
use serde::{Deserialize, Serialize};

/// One billed line of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "desc")]
    pub description: String,
    pub price: f64,
}

impl LineItem {
    /// Build an item ready to be committed to a draft.
    /// The description must not be blank and the price must be positive.
    pub fn committed(description: &str, price: f64) -> AppResult<Self> {
        let description = description.trim();

        if description.is_empty() {
            return Err(AppError::ValidationRejected(
                "item description is empty".into(),
            ));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(AppError::ValidationRejected(format!(
                "item price must be greater than zero (got {price})"
            )));
        }

        Ok(Self {
            description: description.to_string(),
            price: round2(price),
        })
    }
}

/// Editable field of an existing line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Description,
    Price,
}

/// Staging area for an item that is being typed in.
/// A successful add clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemInput {
    pub description: String,
    pub price: Option<f64>,
}

impl ItemInput {
    pub fn new(description: &str, price: Option<f64>) -> Self {
        Self {
            description: description.to_string(),
            price,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.price.is_none()
    }
}
