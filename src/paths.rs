//! Common paths for tabline data storage
//!
//! Configuration lives under the platform config directory:
//! - Linux: ~/.config/tabline/config.toml
//! - macOS: ~/Library/Application Support/tabline/config.toml
//! - Windows: %APPDATA%\tabline\config.toml

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the tabline config directory. Not created until something is saved.
pub fn tabline_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("tabline"))
}

/// Get the config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(tabline_dir()?.join("config.toml"))
}
