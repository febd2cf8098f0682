//! TOML configuration file loading.
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load and deserialize a TOML file.
///
/// A missing file yields the type's empty configuration (as if the file were
/// empty) unless `required` is set.
///
/// # Errors
///
/// Returns an error if the file is required but missing, cannot be read, or
/// cannot be parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path, required: bool) -> Result<T> {
    if !required && !path.exists() {
        return toml::from_str("").context("Failed to create empty config");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
}
