//! Loading datasets and table declarations from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use ledgerview_lib::config::TableConfig;
use ledgerview_lib::controller::TableController;
use ledgerview_lib::model::Record;

/// Environment variable overriding the declared page length.
pub const PAGE_LENGTH_ENV: &str = "LEDGERVIEW_PAGE_LENGTH";

/// Reads a JSON array of records.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&raw)
        .with_context(|| format!("dataset {} is not a JSON array of objects", path.display()))?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Reads a TOML table declaration and applies environment overrides.
pub fn load_table_config(path: &Path) -> Result<TableConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read table config {}", path.display()))?;
    let config = parse_table_config(&raw)
        .with_context(|| format!("invalid table config {}", path.display()))?;
    apply_env_overrides(config, std::env::var(PAGE_LENGTH_ENV).ok().as_deref())
}

pub fn parse_table_config(raw: &str) -> Result<TableConfig> {
    Ok(toml::from_str(raw)?)
}

fn apply_env_overrides(mut config: TableConfig, page_length: Option<&str>) -> Result<TableConfig> {
    if let Some(raw) = page_length {
        let value: usize = raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a positive integer, got '{}'", PAGE_LENGTH_ENV, raw))?;
        if value == 0 {
            bail!("{} must be greater than zero", PAGE_LENGTH_ENV);
        }
        log::debug!("Page length overridden to {} from environment", value);
        config.page_length = value;
    }
    Ok(config)
}

/// Builds a controller from a table declaration and loads the dataset into it.
pub fn open_table(data: &Path, table: &Path) -> Result<TableController> {
    let config = load_table_config(table)?;
    let mut controller =
        TableController::from_config(config).context("table declaration rejected")?;
    controller.on_dataset_replaced(load_records(data)?);
    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
        page_length = 5

        [[filters]]
        key = "status"
        type = "multi_select"

        [[columns]]
        id = "user"
        searchable = true
    "#;

    #[test]
    fn test_parse_table_config() {
        let config = parse_table_config(TABLE).unwrap();
        assert_eq!(config.page_length, 5);
        assert_eq!(config.filters.len(), 1);
        assert_eq!(config.columns.len(), 1);
    }

    #[test]
    fn test_env_override_page_length() {
        let config = parse_table_config(TABLE).unwrap();
        let config = apply_env_overrides(config, Some("25")).unwrap();
        assert_eq!(config.page_length, 25);
    }

    #[test]
    fn test_env_override_rejects_bad_values() {
        let config = parse_table_config(TABLE).unwrap();
        assert!(apply_env_overrides(config.clone(), Some("zero")).is_err());
        assert!(apply_env_overrides(config.clone(), Some("0")).is_err());
        assert_eq!(apply_env_overrides(config, None).unwrap().page_length, 5);
    }
}
