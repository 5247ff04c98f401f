//! Data models for tabline

mod post;
mod sort;
mod tab_type;

pub use post::{Post, PostId};
pub use sort::{SortMode, SortOrder};
pub use tab_type::TabType;
