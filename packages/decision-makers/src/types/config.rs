//! Configuration for the discovery pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// Configuration for the discovery pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Results requested per synthesized query.
    ///
    /// Default: 3.
    pub search_limit: usize,

    /// Results requested by the anchor-profile lookup.
    ///
    /// Default: 5.
    pub anchor_search_limit: usize,

    /// Maximum evidence records serialized for extraction.
    ///
    /// Default: 10.
    pub max_evidence: usize,

    /// Rendered formats requested from the search provider.
    #[serde(default = "default_formats")]
    pub rendered_formats: Vec<String>,

    /// Host of the professional network holding anchor and people profiles.
    pub network_host: String,

    /// Company-site paths tried, in order, for a leadership page.
    #[serde(default = "default_leadership_paths")]
    pub leadership_paths: Vec<String>,

    /// Searches in flight at once. Results are reassembled in query order.
    ///
    /// Default: 4.
    pub max_concurrent_searches: usize,
}

fn default_formats() -> Vec<String> {
    vec!["markdown".to_string()]
}

fn default_leadership_paths() -> Vec<String> {
    ["about", "team", "leadership"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_limit: 3,
            anchor_search_limit: 5,
            max_evidence: 10,
            rendered_formats: default_formats(),
            network_host: "linkedin.com".to_string(),
            leadership_paths: default_leadership_paths(),
            max_concurrent_searches: 4,
        }
    }
}

impl DiscoveryConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set results per query.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Set the evidence cap.
    pub fn with_max_evidence(mut self, max: usize) -> Self {
        self.max_evidence = max;
        self
    }

    /// Set the professional network host.
    pub fn with_network_host(mut self, host: impl Into<String>) -> Self {
        self.network_host = host.into();
        self
    }

    /// Replace the leadership page paths.
    pub fn with_leadership_paths(
        mut self,
        paths: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.leadership_paths = paths.into_iter().map(|p| p.into()).collect();
        self
    }

    /// Set search concurrency.
    pub fn with_max_concurrent_searches(mut self, n: usize) -> Self {
        self.max_concurrent_searches = n;
        self
    }

    /// Validate this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.search_limit == 0 || self.anchor_search_limit == 0 {
            return Err(DiscoveryError::Config(
                "search limits must be greater than 0".to_string(),
            ));
        }
        if self.max_evidence == 0 {
            return Err(DiscoveryError::Config(
                "max_evidence must be greater than 0".to_string(),
            ));
        }
        if self.max_concurrent_searches == 0 {
            return Err(DiscoveryError::Config(
                "max_concurrent_searches must be greater than 0".to_string(),
            ));
        }
        if self.network_host.trim().is_empty() {
            return Err(DiscoveryError::Config(
                "network_host must not be empty".to_string(),
            ));
        }
        if self.rendered_formats.is_empty() {
            return Err(DiscoveryError::Config(
                "rendered_formats must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
