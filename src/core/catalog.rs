//! Reference catalog: technicians and billing accounts, read-only.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Account, Technician};
use crate::utils::path::expand_tilde;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TechEntry {
    market: String,
    #[serde(rename = "techId")]
    tech_id: String,
}

#[derive(Debug, Deserialize)]
struct AccountEntry {
    #[serde(default)]
    rules: String,
    market: String,
}

/// On-disk layout: technician name → `{market, techId}`,
/// account name → `{rules, market}`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    technicians: BTreeMap<String, TechEntry>,
    #[serde(default)]
    accounts: BTreeMap<String, AccountEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    technicians: Vec<Technician>,
    accounts: Vec<Account>,
}

impl Catalog {
    /// Catalog shipped with the binary.
    pub fn builtin() -> Self {
        Self {
            technicians: vec![
                Technician::new("John Smith", "TPA", "07"),
                Technician::new("Jane Doe", "BHM", "12"),
                Technician::new("Alex Brown", "JAX", "03"),
            ],
            accounts: vec![
                Account::new(
                    "1 Stop Maintenance",
                    "Bill net 30, service fee waived",
                    "All",
                ),
                Account::new("ABC Properties", "Add $25 after hours", "TPA"),
                Account::new("Sunrise Apartments", "Must call before service", "BHM"),
            ],
        }
    }

    /// Catalog named in the configuration, or the built-in one.
    pub fn resolve(cfg: &Config) -> AppResult<Self> {
        match &cfg.catalog {
            Some(path) => Self::load(&expand_tilde(path)),
            None => Ok(Self::builtin()),
        }
    }

    /// Load a `.json` file with serde_json, anything else as YAML.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Catalog(format!("{}: {e}", path.display())))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let file: CatalogFile = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| AppError::Catalog(format!("{}: {e}", path.display())))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Catalog(format!("{}: {e}", path.display())))?
        };

        Self::from_file(file)
    }

    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(content).map_err(|e| AppError::Catalog(e.to_string()))?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> AppResult<Self> {
        let mut technicians = Vec::with_capacity(file.technicians.len());
        for (name, entry) in file.technicians {
            if entry.tech_id.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "technician '{name}' has an empty techId"
                )));
            }
            if entry.market.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "technician '{name}' has no market"
                )));
            }
            technicians.push(Technician::new(&name, entry.market.trim(), entry.tech_id.trim()));
        }

        let accounts = file
            .accounts
            .into_iter()
            .map(|(name, entry)| Account::new(&name, &entry.rules, entry.market.trim()))
            .collect();

        Ok(Self {
            technicians,
            accounts,
        })
    }

    pub fn technicians(&self) -> &[Technician] {
        &self.technicians
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Case-insensitive lookup by name.
    pub fn technician(&self, name: &str) -> AppResult<Technician> {
        self.technicians
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| AppError::UnknownTechnician(name.to_string()))
    }

    /// Case-insensitive lookup by name.
    pub fn account(&self, name: &str) -> AppResult<Account> {
        self.accounts
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| AppError::UnknownAccount(name.to_string()))
    }

    pub fn eligible_accounts(&self, tech: &Technician) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.is_eligible_for(tech))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
technicians:
  Jane Doe: { market: BHM, techId: "12" }
  Sam Lee: { market: TPA, techId: "T1045" }
accounts:
  1 Stop Maintenance: { rules: "Bill net 30", market: all }
  Sunrise Apartments: { rules: "Call first", market: BHM }
  ABC Properties: { market: TPA }
"#;

    #[test]
    fn yaml_catalog_is_parsed() {
        let cat = Catalog::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(cat.technicians().len(), 2);
        let sam = cat.technician("sam lee").unwrap();
        assert_eq!(sam.market, "TPA");
        assert_eq!(sam.suffix(), "45");
        assert_eq!(cat.account("ABC Properties").unwrap().rules, "");
    }

    #[test]
    fn eligible_accounts_follow_market() {
        let cat = Catalog::from_yaml_str(SAMPLE).unwrap();
        let jane = cat.technician("Jane Doe").unwrap();

        let names: Vec<&str> = cat
            .eligible_accounts(&jane)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, ["1 Stop Maintenance", "Sunrise Apartments"]);
    }

    #[test]
    fn empty_tech_id_is_rejected() {
        let err = Catalog::from_yaml_str("technicians:\n  X: { market: BHM, techId: '' }\n")
            .unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[test]
    fn unknown_names_are_reported() {
        let cat = Catalog::builtin();
        assert!(matches!(
            cat.technician("Nobody"),
            Err(AppError::UnknownTechnician(_))
        ));
        assert!(matches!(cat.account("Nowhere"), Err(AppError::UnknownAccount(_))));
    }
}
