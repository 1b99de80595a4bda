//! Error types for digest publishing.

use insider_data::StoreError;
use thiserror::Error;

/// Errors from the Telegram transport.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("telegram token is not configured")]
    MissingToken,

    #[error("telegram chat id is not configured")]
    MissingChat,

    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status or an `"ok": false` body.
    #[error("telegram rejected message ({status}): {description}")]
    Api { status: u16, description: String },
}

/// Errors from publishing one section of the digest.
#[derive(Debug, Error)]
pub enum PublishError {
    /// An aggregate came back with no rows; the section is not sent.
    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("failed to load {section}: {source}")]
    Store {
        section: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("failed to send {section}: {source}")]
    Send {
        section: &'static str,
        #[source]
        source: SendError,
    },
}

impl PublishError {
    /// Name of the digest section that failed.
    #[must_use]
    pub fn section(&self) -> &'static str {
        match self {
            Self::Empty(section) | Self::Store { section, .. } | Self::Send { section, .. } => section,
        }
    }
}

/// Result type alias for publishing.
pub type Result<T> = std::result::Result<T, PublishError>;
