//! Configuration module for tabline

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::filter::{FilterRule, FilterSettings};
use crate::models::{SortMode, SortOrder, TabType};
use crate::tab::Tab;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Track read/unread state in tabs that don't say otherwise
    #[serde(default = "default_unread_manage")]
    pub unread_manage: bool,

    /// Sort column for tabs that don't say otherwise
    #[serde(default)]
    pub sort_mode: SortMode,

    /// Sort direction for tabs that don't say otherwise
    #[serde(default)]
    pub sort_order: SortOrder,

    /// Configured tabs, in display order
    #[serde(default = "default_tabs")]
    pub tabs: Vec<TabConfig>,
}

/// One configured tab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabConfig {
    /// Tab title
    pub name: String,

    /// What the tab is used for
    #[serde(default, rename = "type")]
    pub tab_type: TabType,

    /// Override of [`Config::unread_manage`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_manage: Option<bool>,

    /// Override of [`Config::sort_mode`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_mode: Option<SortMode>,

    /// Override of [`Config::sort_order`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    /// Filter rules attached to the tab
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterSettings>,
}

impl TabConfig {
    /// A tab with no overrides and no filters
    pub fn new(name: &str, tab_type: TabType) -> Self {
        Self {
            name: name.to_string(),
            tab_type,
            unread_manage: None,
            sort_mode: None,
            sort_order: None,
            filters: Vec::new(),
        }
    }
}

fn default_unread_manage() -> bool {
    true
}

fn default_tabs() -> Vec<TabConfig> {
    vec![
        TabConfig::new("Recent", TabType::Home),
        TabConfig::new("Reply", TabType::Mentions),
        TabConfig::new("Direct", TabType::DirectMessage),
        TabConfig::new("Favorites", TabType::Favorites),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unread_manage: default_unread_manage(),
            sort_mode: SortMode::default(),
            sort_order: SortOrder::default(),
            tabs: default_tabs(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        crate::paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Check every filter pattern compiles
    pub fn validate(&self) -> Result<()> {
        for tab in &self.tabs {
            for settings in &tab.filters {
                settings
                    .include
                    .validate()
                    .and_then(|()| settings.exclude.validate())
                    .with_context(|| format!("Invalid filter in tab '{}'", tab.name))?;
            }
        }
        Ok(())
    }

    /// Find a configured tab by name (case-insensitive)
    pub fn find_tab(&self, name: &str) -> Option<&TabConfig> {
        self.tabs.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Build an empty tab from its configuration, with its filters attached
    pub fn build_tab(&self, tab_config: &TabConfig) -> Tab {
        let mut tab = Tab::new(&tab_config.name, tab_config.tab_type);
        tab.set_unread_manage(tab_config.unread_manage.unwrap_or(self.unread_manage));
        tab.set_sort_mode(tab_config.sort_mode.unwrap_or(self.sort_mode));
        tab.set_sort_order(tab_config.sort_order.unwrap_or(self.sort_order));
        tab.set_filters(
            tab_config
                .filters
                .iter()
                .cloned()
                .map(FilterRule::from_settings)
                .collect(),
        );
        // Freshly loaded rules are not edits
        tab.set_filter_modified(false);
        tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterResult;
    use crate::models::Post;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.unread_manage);
        assert_eq!(config.tabs.len(), 4);
        assert!(config.tabs.iter().all(|t| t.tab_type.is_default()));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.sort_order = SortOrder::Descending;
        let mut tab = TabConfig::new("OpenTween", TabType::UserDefined);
        let mut settings = FilterSettings::default();
        settings.include.source = "OpenTween".into();
        tab.filters.push(settings);
        config.tabs.push(tab);

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.sort_order, SortOrder::Descending);
        let tab = loaded.find_tab("opentween").unwrap();
        assert_eq!(tab.tab_type, TabType::UserDefined);
        assert_eq!(tab.filters[0].include.source, "OpenTween");
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            unread_manage = false
            sort_mode = "name"

            [[tabs]]
            name = "Search"
            type = "public_search"
            unread_manage = true
            sort_order = "descending"

            [[tabs.filters]]
            include = { body = ["rust"] }
            move_matches = true
            "#,
        )
        .unwrap();

        let tab = config.build_tab(&config.tabs[0]);
        assert_eq!(tab.tab_type(), TabType::PublicSearch);
        assert!(tab.unread_manage());
        assert_eq!(tab.sort_mode(), SortMode::Name);
        assert_eq!(tab.sort_order(), SortOrder::Descending);
        assert!(!tab.filter_modified());

        let post = Post::new(1).with_text("Learning Rust");
        assert_eq!(tab.evaluate_filters(&post), FilterResult::Move);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [[tabs]]
            name = "Broken"
            type = "user_defined"

            [[tabs.filters]]
            include = { name = "(", use_regex = true }
            "#,
        )
        .unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
