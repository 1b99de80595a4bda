//! Error types for listing scraping.

use insider_core::Side;
use thiserror::Error;

/// Errors that abort a scrape run.
///
/// Per-row parse failures are not errors at this level; see
/// [`crate::extract::RowError`].
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The listing request could not be completed.
    #[error("{side} listing request failed: {source}")]
    Fetch {
        side: Side,
        #[source]
        source: reqwest::Error,
    },

    /// The listing answered with a non-success status.
    #[error("{side} listing returned HTTP {status}")]
    Status { side: Side, status: u16 },

    /// A CSS selector failed to compile.
    #[error("invalid selector {selector:?}: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl ScrapeError {
    /// The listing that failed, if the error is tied to one.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Fetch { side, .. } | Self::Status { side, .. } => Some(*side),
            Self::Selector { .. } | Self::Client(_) => None,
        }
    }
}

/// Result type alias for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_side() {
        let err = ScrapeError::Status {
            side: Side::Sale,
            status: 503,
        };
        assert_eq!(err.side(), Some(Side::Sale));
        assert_eq!(err.to_string(), "sale listing returned HTTP 503");
    }

    #[test]
    fn test_selector_error_has_no_side() {
        let err = ScrapeError::Selector {
            selector: "tr >",
            message: "unexpected end".to_string(),
        };
        assert_eq!(err.side(), None);
        assert!(err.to_string().contains("tr >"));
    }
}
