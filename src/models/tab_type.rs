//! Tab usage kinds

use serde::{Deserialize, Serialize};

/// What a tab is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabType {
    /// Home timeline
    #[default]
    Home,
    /// Replies and mentions
    Mentions,
    /// Direct messages
    DirectMessage,
    /// Favorited posts
    Favorites,
    /// User-created tab fed by filter rules
    UserDefined,
    /// A list timeline
    Lists,
    /// A single user's timeline
    UserTimeline,
    /// A saved public search
    PublicSearch,
    /// Conversation related to a post
    Related,
}

impl TabType {
    /// Get all tab types
    pub const fn all() -> &'static [Self] {
        &[
            Self::Home,
            Self::Mentions,
            Self::DirectMessage,
            Self::Favorites,
            Self::UserDefined,
            Self::Lists,
            Self::UserTimeline,
            Self::PublicSearch,
            Self::Related,
        ]
    }

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Mentions => "Mentions",
            Self::DirectMessage => "Direct Messages",
            Self::Favorites => "Favorites",
            Self::UserDefined => "User Defined",
            Self::Lists => "List",
            Self::UserTimeline => "User Timeline",
            Self::PublicSearch => "Search",
            Self::Related => "Related",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "home" => Some(Self::Home),
            "mentions" | "replies" => Some(Self::Mentions),
            "direct_message" | "dm" => Some(Self::DirectMessage),
            "favorites" | "favs" => Some(Self::Favorites),
            "user_defined" => Some(Self::UserDefined),
            "lists" | "list" => Some(Self::Lists),
            "user_timeline" | "user" => Some(Self::UserTimeline),
            "public_search" | "search" => Some(Self::PublicSearch),
            "related" => Some(Self::Related),
            _ => None,
        }
    }

    /// Built-in tabs that always exist and cannot be removed
    pub const fn is_default(&self) -> bool {
        matches!(
            self,
            Self::Home | Self::Mentions | Self::DirectMessage | Self::Favorites
        )
    }

    /// Tabs that receive posts distributed by filter rules
    pub const fn is_distributable(&self) -> bool {
        matches!(self, Self::Mentions | Self::UserDefined)
    }

    /// Tabs that keep their own post payloads instead of sharing them with
    /// the other tabs
    pub const fn is_inner_storage(&self) -> bool {
        matches!(
            self,
            Self::DirectMessage
                | Self::Lists
                | Self::UserTimeline
                | Self::PublicSearch
                | Self::Related
        )
    }
}

impl std::fmt::Display for TabType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_default() {
        let expected = [
            (TabType::Home, true),
            (TabType::Mentions, true),
            (TabType::DirectMessage, true),
            (TabType::Favorites, true),
            (TabType::UserDefined, false),
            (TabType::Lists, false),
            (TabType::UserTimeline, false),
            (TabType::PublicSearch, false),
            (TabType::Related, false),
        ];
        for (tab_type, is_default) in expected {
            assert_eq!(tab_type.is_default(), is_default, "{tab_type:?}");
        }
    }

    #[test]
    fn test_is_distributable() {
        let distributable: Vec<_> = TabType::all()
            .iter()
            .filter(|t| t.is_distributable())
            .copied()
            .collect();
        assert_eq!(distributable, vec![TabType::Mentions, TabType::UserDefined]);
    }

    #[test]
    fn test_is_inner_storage() {
        let expected = [
            (TabType::Home, false),
            (TabType::Mentions, false),
            (TabType::DirectMessage, true),
            (TabType::Favorites, false),
            (TabType::UserDefined, false),
            (TabType::Lists, true),
            (TabType::UserTimeline, true),
            (TabType::PublicSearch, true),
            (TabType::Related, true),
        ];
        for (tab_type, inner) in expected {
            assert_eq!(tab_type.is_inner_storage(), inner, "{tab_type:?}");
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(TabType::from_str("user-timeline"), Some(TabType::UserTimeline));
        assert_eq!(TabType::from_str("Search"), Some(TabType::PublicSearch));
        assert_eq!(TabType::from_str("bookmarks"), None);
    }
}
