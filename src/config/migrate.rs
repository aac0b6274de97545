//! Configuration file maintenance: detect and fill keys that older
//! versions of the file do not carry.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Keys of `Config::FIELDS` absent from the YAML file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    let Some(map) = yaml.as_mapping() else {
        return Ok(Config::FIELDS.to_vec());
    };

    Ok(Config::FIELDS
        .iter()
        .copied()
        .filter(|key| !map.contains_key(Value::String((*key).to_string())))
        .collect())
}

/// Rewrite the file with every missing key set to its default.
/// Existing values are preserved. Returns the keys that were added.
pub fn migrate_config(path: &Path) -> AppResult<Vec<&'static str>> {
    let missing = missing_fields(path)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let cfg = Config::load_from(path)?;
    cfg.save_to(path)?;
    Ok(missing)
}
