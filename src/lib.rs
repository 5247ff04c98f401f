//! # tabline
//!
//! Timeline tab store for social clients.
//!
//! ## Overview
//!
//! A client shows its timelines as tabs: Home, Mentions, a list, a saved
//! search, one user's posts. Each tab keeps its own sequence of posts, its own
//! sort column and direction, its own unread badge and the filter rules that
//! decide which posts it receives. tabline is that bookkeeping, without any
//! UI or network code attached.
//!
//! ## Architecture
//!
//! ```text
//!     fetch results            settings view
//!          │                        │
//!          ▼ stage()                ▼ edit
//! ┌─────────────────┐      ┌─────────────────┐
//! │  pending buffer │      │   FilterRule    │
//! └─────────────────┘      │ (shared handle) │
//!          │ submit()      └─────────────────┘
//!          ▼                        │ revision
//! ┌─────────────────────────────────┴───────┐
//! │                  Tab                    │
//! │ • visible sequence (sorted / unsorted)  │
//! │ • unread count, oldest unread           │
//! │ • attached filters, modified flag       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tab`] — The tab store
//! - [`filter`] — Filter rules and matching
//! - [`models`] — Data models (Post, SortMode, TabType)
//! - [`config`] — Configuration management
//! - [`error`] — Error type for the fallible edges
//!
//! ## Example
//!
//! ```
//! use tabline::{Post, SortMode, SortOrder, Tab, TabType};
//!
//! let mut tab = Tab::new("Recent", TabType::Home);
//! tab.set_sort(SortMode::Id, SortOrder::Descending);
//!
//! tab.stage(Post::new(101));
//! tab.stage(Post::new(100));
//! assert_eq!(tab.all_count(), 0);
//!
//! assert_eq!(tab.submit(), 2);
//! assert_eq!(tab.ids(), &[101, 100]);
//! assert_eq!(tab.unread_count(), 2);
//! assert!(tab.is_sorted_by_id());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod paths;
pub mod tab;

// Re-export main types for convenience
pub use config::{Config, TabConfig};
pub use error::{Error, Result};
pub use filter::{FilterConditions, FilterResult, FilterRule, FilterSettings};
pub use models::{Post, PostId, SortMode, SortOrder, TabType};
pub use tab::Tab;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
