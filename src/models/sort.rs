//! Sort key and direction for a tab's visible sequence

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Post;

/// Column a tab is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Status ID (chronological)
    #[default]
    Id,
    /// Post body
    Data,
    /// Author screen name
    Name,
    /// Author display name
    Nickname,
    /// Client source
    Source,
}

impl SortMode {
    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Data => "data",
            Self::Name => "name",
            Self::Nickname => "nickname",
            Self::Source => "source",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "id" | "time" => Some(Self::Id),
            "data" | "text" | "body" => Some(Self::Data),
            "name" | "screen_name" => Some(Self::Name),
            "nickname" | "nick" => Some(Self::Nickname),
            "source" | "via" => Some(Self::Source),
            _ => None,
        }
    }

    /// Compare two posts by this column. Ties fall back to the ID so the
    /// order is total.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let primary = match self {
            Self::Id => Ordering::Equal,
            Self::Data => a.text.cmp(&b.text),
            Self::Name => a.screen_name.cmp(&b.screen_name),
            Self::Nickname => a.nickname.cmp(&b.nickname),
            Self::Source => a.source.cmp(&b.source),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortOrder {
    /// Apply this direction to an ascending comparison
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_falls_back_to_id() {
        let a = Post::new(1).with_author("alice", "Alice");
        let b = Post::new(2).with_author("alice", "Alice");
        assert_eq!(SortMode::Name.compare(&a, &b), Ordering::Less);
        assert_eq!(SortMode::Id.compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_descending_reverses() {
        let a = Post::new(1).with_source("web");
        let b = Post::new(2).with_source("api");
        let ord = SortMode::Source.compare(&a, &b);
        assert_eq!(ord, Ordering::Greater);
        assert_eq!(SortOrder::Descending.apply(ord), Ordering::Less);
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(SortMode::from_str("Text"), Some(SortMode::Data));
        assert_eq!(SortMode::from_str("via"), Some(SortMode::Source));
        assert_eq!(SortMode::from_str("likes"), None);
    }
}
