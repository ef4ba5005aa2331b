//! Typed errors for the discovery library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so collaborators
//! can report strongly-typed failures. The planner itself never surfaces
//! these to its caller; see [`crate::pipeline::planner`].

use thiserror::Error;

/// Errors raised by discovery collaborators and pipeline stages.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Search provider failed for a query
    #[error("search failed for '{query}': {source}")]
    Search {
        query: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Page fetch failed
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Extraction engine failed
    #[error("extraction error: {0}")]
    Extraction(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// HTTP transport or non-success status
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl DiscoveryError {
    /// Wrap any error as a search failure for `query`.
    pub fn search(
        query: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Search {
            query: query.into(),
            source: source.into(),
        }
    }

    /// Wrap any error as a fetch failure for `url`.
    pub fn fetch(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
