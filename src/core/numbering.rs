//! Invoice numbering: `{LOCATION}-{SUFFIX}-{SEQUENCE}`.
//!
//! One counter per `(location, technician suffix)` scope. `next_number`
//! commits: the incremented counter is stored before the number is handed
//! out, so two calls in the same scope never return the same value. A number
//! that is assigned but never exported is simply skipped; sequences may have
//! gaps but never repeats.
//!
//! Counters are not safe against two processes sharing one database.

use crate::db::store::CounterStore;
use crate::errors::{AppError, AppResult};
use crate::models::Technician;
use crate::ui::messages::warning;

/// Minimum number of digits of the sequence part.
pub const MIN_SEQUENCE_DIGITS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub location: String,
    pub suffix: String,
}

impl Scope {
    pub fn for_technician(tech: &Technician) -> Self {
        Self {
            location: tech.market.trim().to_uppercase(),
            suffix: tech.suffix(),
        }
    }

    /// Counter key, e.g. `BHM:12`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.location, self.suffix)
    }

    pub fn format(&self, sequence: u64) -> String {
        format!(
            "{}-{}-{:0width$}",
            self.location,
            self.suffix,
            sequence,
            width = MIN_SEQUENCE_DIGITS
        )
    }
}

pub struct NumberingService<C: CounterStore> {
    store: C,
}

impl<C: CounterStore> NumberingService<C> {
    pub fn new(store: C) -> Self {
        Self { store }
    }

    /// Current counter of `scope`; unreadable values count as `0`.
    pub fn current_value(&self, scope: &Scope) -> AppResult<u64> {
        match self.store.read_counter(&scope.key()) {
            Ok(v) => Ok(v.unwrap_or(0)),
            Err(AppError::CorruptPersistedState(msg)) => {
                warning(format!("{msg}. Counter reset to 0."));
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    /// Assign the next number for the technician's scope. Not idempotent:
    /// call it once per finalized invoice.
    pub fn next_number(&mut self, tech: Option<&Technician>) -> AppResult<String> {
        let scope = Scope::for_technician(tech.ok_or(AppError::MissingSelection)?);

        let next = self
            .current_value(&scope)?
            .checked_add(1)
            .ok_or_else(|| AppError::Other(format!("sequence exhausted for {}", scope.key())))?;

        self.store.write_counter(&scope.key(), next)?;

        Ok(scope.format(next))
    }

    /// The number `next_number` would return now, without committing it.
    pub fn preview_next(&self, tech: Option<&Technician>) -> AppResult<String> {
        let scope = Scope::for_technician(tech.ok_or(AppError::MissingSelection)?);
        Ok(scope.format(self.current_value(&scope)?.saturating_add(1)))
    }

    pub fn counters(&self) -> AppResult<Vec<(String, u64)>> {
        self.store.counters()
    }
}
