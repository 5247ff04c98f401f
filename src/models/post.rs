//! Post/Status model as seen by a timeline tab

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Numeric status ID assigned by the network. Never negative.
pub type PostId = u64;

/// A post/status held by a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Network status ID
    pub id: PostId,
    /// Author screen name (without the leading `@`)
    #[serde(default)]
    pub screen_name: String,
    /// Author display name
    #[serde(default)]
    pub nickname: String,
    /// Post body (plain text)
    #[serde(default)]
    pub text: String,
    /// Client the post was sent from
    #[serde(default)]
    pub source: String,
    /// When the post was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Whether the user has already seen this post
    #[serde(default)]
    pub is_read: bool,
}

impl Post {
    /// Create an empty unread post with the given ID
    pub fn new(id: PostId) -> Self {
        Self {
            id,
            screen_name: String::new(),
            nickname: String::new(),
            text: String::new(),
            source: String::new(),
            created_at: Utc::now(),
            is_read: false,
        }
    }

    /// Set the author
    pub fn with_author(mut self, screen_name: &str, nickname: &str) -> Self {
        self.screen_name = screen_name.to_string();
        self.nickname = nickname.to_string();
        self
    }

    /// Set the body text
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Set the client source
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Set the read flag
    pub const fn with_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    /// Read a JSON array of posts from a file
    pub fn load_all(path: &Path) -> Result<Vec<Self>> {
        let content = std::fs::read_to_string(path)?;
        let posts = serde_json::from_str(&content)?;
        Ok(posts)
    }

    /// Get a short preview of the content (for list display)
    pub fn preview(&self, max_len: usize) -> String {
        let content = self.text.replace('\n', " ");
        if content.chars().count() <= max_len {
            content
        } else {
            let cut: String = content.chars().take(max_len.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }

    /// Get relative time string (e.g., "5m", "2h", "3d")
    pub fn relative_time(&self) -> String {
        let now = Utc::now();
        let duration = now.signed_duration_since(self.created_at);

        if duration.num_seconds() < 60 {
            format!("{}s", duration.num_seconds().max(0))
        } else if duration.num_minutes() < 60 {
            format!("{}m", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h", duration.num_hours())
        } else if duration.num_days() < 7 {
            format!("{}d", duration.num_days())
        } else {
            self.created_at.format("%b %d").to_string()
        }
    }
}
