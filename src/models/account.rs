use crate::models::technician::Technician;
use serde::{Deserialize, Serialize};

/// Market value that makes an account available everywhere.
pub const ALL_MARKETS: &str = "all";

/// A billing account from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    /// Free-form billing rules shown to the technician on selection.
    #[serde(default)]
    pub rules: String,
    /// Location code, or `all`.
    pub market: String,
}

impl Account {
    pub fn new(name: &str, rules: &str, market: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: rules.to_string(),
            market: market.to_string(),
        }
    }

    pub fn is_all_markets(&self) -> bool {
        self.market.eq_ignore_ascii_case(ALL_MARKETS)
    }

    /// An account can be billed by a technician when it is open to all
    /// markets or belongs to the technician's market.
    pub fn is_eligible_for(&self, tech: &Technician) -> bool {
        self.is_all_markets() || self.market.eq_ignore_ascii_case(&tech.market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_follows_market() {
        let jane = Technician::new("Jane Doe", "BHM", "12");

        assert!(Account::new("1 Stop Maintenance", "", "All").is_eligible_for(&jane));
        assert!(Account::new("Sunrise Apartments", "", "BHM").is_eligible_for(&jane));
        assert!(!Account::new("ABC Properties", "", "TPA").is_eligible_for(&jane));
    }
}
