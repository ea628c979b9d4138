//! Configuration file upgrades: detect fields added by newer releases and
//! write them back with their default values.

use super::Config;
use crate::errors::AppResult;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Fields a complete configuration file carries.
pub const EXPECTED_FIELDS: [&str; 5] = [
    "database",
    "catalog",
    "export_dir",
    "default_format",
    "separator_char",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&content)?;
    Ok(value.as_mapping().cloned().unwrap_or_default())
}

/// Names of the expected fields absent from the file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(EXPECTED_FIELDS
        .iter()
        .copied()
        .filter(|f| !map.contains_key(Value::String((*f).to_string())))
        .collect())
}

/// Add every missing field with its default value, leaving present ones
/// untouched. Returns the names of the fields that were added.
pub fn fill_missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let missing = missing_fields(path)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let mut map = read_mapping(path)?;
    let defaults = serde_yaml::to_value(Config::default())?;

    if let Some(defaults) = defaults.as_mapping() {
        for field in &missing {
            let key = Value::String((*field).to_string());
            if let Some(v) = defaults.get(&key) {
                map.insert(key, v.clone());
            }
        }
    }

    fs::write(path, serde_yaml::to_string(&Value::Mapping(map))?)?;
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn fills_only_what_is_missing() {
        let path = env::temp_dir().join("techinvoice_migrate_test.conf");
        fs::write(&path, "database: /data/inv.sqlite\nseparator_char: '='\n").unwrap();

        let missing = missing_fields(&path).unwrap();
        assert_eq!(missing, ["catalog", "export_dir", "default_format"]);

        fill_missing_fields(&path).unwrap();
        assert!(missing_fields(&path).unwrap().is_empty());

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/data/inv.sqlite");
        assert_eq!(cfg.separator_char, "=");
        assert_eq!(cfg.default_format, "xlsx");

        fs::remove_file(&path).ok();
    }
}
