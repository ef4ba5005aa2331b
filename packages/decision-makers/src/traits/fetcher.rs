//! Page fetcher trait for direct company-site fetches.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Outcome of a single page fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// Whether the provider reports success.
    pub success: bool,

    /// Rendered page content (markdown).
    pub rendered_content: Option<String>,

    /// Page title, when the provider supplies one.
    pub title: Option<String>,
}

impl FetchResponse {
    /// A successful fetch with content.
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            rendered_content: Some(content.into()),
            title: None,
        }
    }

    /// A fetch the provider reported as failed.
    pub fn failed() -> Self {
        Self::default()
    }

    /// Usable content: `success` and non-blank rendered content.
    ///
    /// Anything else is treated the same as a thrown failure.
    pub fn usable_content(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.rendered_content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}

/// Fetches a single URL with rendering.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and render `url`.
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
