//! Error types for tabline

use thiserror::Error;

/// Errors raised at the fallible edges of the crate.
///
/// Tab operations themselves never fail: lookups of unknown IDs are no-ops
/// and disabled unread tracking reports its "none" values.
#[derive(Error, Debug)]
pub enum Error {
    /// A filter rule carries a regular expression that does not compile
    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler error
        #[source]
        source: regex_lite::Error,
    },

    /// Unrecognized sort mode name
    #[error("Unknown sort mode: {0}")]
    UnknownSortMode(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Post data could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
