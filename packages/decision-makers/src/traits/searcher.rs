//! Web searcher trait for evidence discovery.
//!
//! Abstracts over search providers that can return rendered page content
//! alongside each hit (Firecrawl, Tavily, etc.). The planner only needs
//! ordered results; relevance scoring stays with the provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::evidence::EvidenceRecord;

/// Per-call search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results.
    pub limit: usize,

    /// Rendered formats to include with each result (e.g., "markdown").
    pub rendered_formats: Vec<String>,
}

impl SearchOptions {
    /// Create options with a limit and no rendered formats.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            rendered_formats: Vec::new(),
        }
    }

    /// Request rendered formats.
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.rendered_formats = formats.into_iter().map(|f| f.into()).collect();
        self
    }
}

/// Web search trait.
///
/// Results must come back in provider relevance order; the anchor resolver
/// trusts that order as its tie-break.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning up to `options.limit` records.
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<EvidenceRecord>>;

    /// Get the searcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
