//! Page tree error types.

use thiserror::Error;

/// Error raised while loading or serializing a page.
#[derive(Debug, Error)]
pub enum DomError {
    /// The markup could not be tokenized.
    #[error("malformed markup at byte {position}")]
    Markup {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// An attribute could not be read.
    #[error("malformed attribute at byte {position}")]
    Attribute {
        position: u64,
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },

    /// The markup contained bytes that are not UTF-8.
    #[error("markup is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),

    /// Writing the serialized tree failed.
    #[error("failed to serialize page")]
    Write(#[from] std::io::Error),
}

/// Result type alias for page tree operations.
pub type Result<T> = std::result::Result<T, DomError>;
