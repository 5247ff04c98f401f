//! Filter rules that sort incoming posts into tabs
//!
//! A [`FilterRule`] is a shared handle: clones point at the same rule, so a
//! settings view can edit a rule while tabs hold it. Every edit bumps the
//! rule's revision, which is how an owning [`Tab`](crate::Tab) notices that
//! one of its rules changed. The rule itself never references a tab.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use regex_lite::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Post;

/// A set of conditions matched against a post.
///
/// Every non-empty field must match. A set with no fields never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConditions {
    /// Author screen name
    pub name: String,
    /// Keywords that must all appear in the body
    pub body: Vec<String>,
    /// Client source
    pub source: String,
    /// Treat `name`, `body` and `source` as regular expressions
    pub use_regex: bool,
    /// Match case exactly
    pub case_sensitive: bool,
}

impl FilterConditions {
    /// Whether no condition is set
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.source.is_empty()
            && self.body.iter().all(String::is_empty)
    }

    /// Check the conditions against a post
    pub fn matches(&self, post: &Post) -> bool {
        if self.is_empty() {
            return false;
        }

        if !self.name.is_empty() && !self.matches_exact(&self.name, &post.screen_name) {
            return false;
        }
        if !self.source.is_empty() && !self.matches_exact(&self.source, &post.source) {
            return false;
        }

        self.body
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .all(|keyword| self.matches_partial(keyword, &post.text))
    }

    /// Compile every pattern, reporting the first that fails
    pub fn validate(&self) -> Result<()> {
        if !self.use_regex {
            return Ok(());
        }
        for pattern in self.patterns() {
            self.compile(pattern)?;
        }
        Ok(())
    }

    fn patterns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.source.as_str()))
            .chain(self.body.iter().map(String::as_str))
            .filter(|p| !p.is_empty())
    }

    fn compile(&self, pattern: &str) -> Result<Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(!self.case_sensitive)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    fn matches_regex(&self, pattern: &str, value: &str) -> bool {
        match self.compile(pattern) {
            Ok(re) => re.is_match(value),
            Err(e) => {
                tracing::warn!("Skipping filter condition: {}", e);
                false
            }
        }
    }

    fn matches_exact(&self, pattern: &str, value: &str) -> bool {
        if self.use_regex {
            self.matches_regex(pattern, value)
        } else if self.case_sensitive {
            pattern == value
        } else {
            pattern.to_lowercase() == value.to_lowercase()
        }
    }

    fn matches_partial(&self, pattern: &str, value: &str) -> bool {
        if self.use_regex {
            self.matches_regex(pattern, value)
        } else if self.case_sensitive {
            value.contains(pattern)
        } else {
            value.to_lowercase().contains(&pattern.to_lowercase())
        }
    }
}

/// Everything a filter rule is configured with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Disabled rules never match
    pub enabled: bool,
    /// Remove matched posts from the home timeline
    pub move_matches: bool,
    /// Highlight matched posts that stay in the home timeline
    pub mark_matches: bool,
    /// Conditions that pull a post into the tab
    pub include: FilterConditions,
    /// Conditions that keep a post out of the tab, even when included
    pub exclude: FilterConditions,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            move_matches: false,
            mark_matches: true,
            include: FilterConditions::default(),
            exclude: FilterConditions::default(),
        }
    }
}

/// Outcome of matching a post against one or more rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FilterResult {
    /// No rule matched
    #[default]
    None,
    /// Copy into the tab, keep in home
    Copy,
    /// Copy into the tab and mark in home
    CopyAndMark,
    /// Move into the tab, drop from home
    Move,
    /// An exclusion matched; the post stays out of the tab
    Exclude,
}

impl FilterResult {
    /// Whether the post belongs in the tab
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Copy | Self::CopyAndMark | Self::Move)
    }
}

struct RuleInner {
    id: Uuid,
    settings: RwLock<FilterSettings>,
    revision: AtomicU64,
}

/// Shared handle to a filter rule
#[derive(Clone)]
pub struct FilterRule {
    inner: Arc<RuleInner>,
}

impl FilterRule {
    /// Create a rule with default settings (enabled, no conditions)
    pub fn new() -> Self {
        Self::from_settings(FilterSettings::default())
    }

    /// Create a rule from settings
    pub fn from_settings(settings: FilterSettings) -> Self {
        Self {
            inner: Arc::new(RuleInner {
                id: Uuid::new_v4(),
                settings: RwLock::new(settings),
                revision: AtomicU64::new(0),
            }),
        }
    }

    /// Identity shared by all clones of this handle
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Number of edits made to this rule so far
    pub fn revision(&self) -> u64 {
        self.inner.revision.load(Ordering::Acquire)
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> FilterSettings {
        self.inner
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Edit the settings in place and notify observers
    pub fn update(&self, edit: impl FnOnce(&mut FilterSettings)) {
        {
            let mut settings = self
                .inner
                .settings
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            edit(&mut settings);
        }
        self.inner.revision.fetch_add(1, Ordering::AcqRel);
    }

    /// Enable or disable the rule
    pub fn set_enabled(&self, enabled: bool) {
        self.update(|s| s.enabled = enabled);
    }

    /// Set the screen name to match
    pub fn set_filter_name(&self, name: &str) {
        self.update(|s| s.include.name = name.to_string());
    }

    /// Set the body keywords to match
    pub fn set_filter_body(&self, body: Vec<String>) {
        self.update(|s| s.include.body = body);
    }

    /// Set the client source to match
    pub fn set_filter_source(&self, source: &str) {
        self.update(|s| s.include.source = source.to_string());
    }

    /// Set the screen name to exclude
    pub fn set_exclude_name(&self, name: &str) {
        self.update(|s| s.exclude.name = name.to_string());
    }

    /// Set the body keywords to exclude
    pub fn set_exclude_body(&self, body: Vec<String>) {
        self.update(|s| s.exclude.body = body);
    }


    /// Check every pattern of the rule compiles
    pub fn validate(&self) -> Result<()> {
        let settings = self.settings();
        settings.include.validate()?;
        settings.exclude.validate()
    }

    /// Match a post against the rule
    pub fn evaluate(&self, post: &Post) -> FilterResult {
        let settings = self
            .inner
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        if !settings.enabled {
            return FilterResult::None;
        }
        if settings.exclude.matches(post) {
            return FilterResult::Exclude;
        }
        if !settings.include.matches(post) {
            return FilterResult::None;
        }

        if settings.move_matches {
            FilterResult::Move
        } else if settings.mark_matches {
            FilterResult::CopyAndMark
        } else {
            FilterResult::Copy
        }
    }
}

impl Default for FilterRule {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for FilterRule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for FilterRule {}

impl std::fmt::Debug for FilterRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRule")
            .field("id", &self.inner.id)
            .field("revision", &self.revision())
            .field("settings", &self.settings())
            .finish()
    }
}
