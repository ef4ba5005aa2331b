//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the discovery library
//! without making real search, scrape or LLM calls. Every mock records its
//! calls so tests can assert on what was (or was not) issued.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{DiscoveryError, Result};
use crate::traits::{
    extractor::FieldExtractor,
    fetcher::{FetchResponse, PageFetcher},
    searcher::{SearchOptions, WebSearcher},
};
use crate::types::{
    context::EnrichmentContext, evidence::EvidenceRecord, field::Field, result::Enrichments,
};

/// Record of a call made to [`MockSearcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub query: String,
    pub limit: usize,
    pub rendered_formats: Vec<String>,
}

/// A mock web searcher.
///
/// Unknown queries return no results; queries marked with
/// [`MockSearcher::failing_on`] return an error.
#[derive(Default, Clone)]
pub struct MockSearcher {
    results: Arc<RwLock<HashMap<String, Vec<EvidenceRecord>>>>,
    failures: Arc<RwLock<HashSet<String>>>,
    fail_all: bool,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    calls: Arc<RwLock<Vec<SearchCall>>>,
    completed: Arc<RwLock<Vec<String>>>,
}

impl MockSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for a query.
    pub fn with_results(self, query: &str, results: Vec<EvidenceRecord>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Add URL-only results for a query.
    pub fn with_urls(self, query: &str, urls: &[&str]) -> Self {
        let results = urls
            .iter()
            .map(|u| EvidenceRecord::new(*u).with_markdown(format!("Content of {}", u)))
            .collect();
        self.with_results(query, results)
    }

    /// Make a query fail.
    pub fn failing_on(self, query: &str) -> Self {
        self.failures.write().unwrap().insert(query.to_string());
        self
    }

    /// Make every query fail.
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Delay the answer to a query.
    pub fn with_delay(self, query: &str, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(query.to_string(), delay);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.read().unwrap().clone()
    }

    /// Queries issued, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.query).collect()
    }

    /// Queries in the order their answers were produced.
    pub fn completed(&self) -> Vec<String> {
        self.completed.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<EvidenceRecord>> {
        self.calls.write().unwrap().push(SearchCall {
            query: query.to_string(),
            limit: options.limit,
            rendered_formats: options.rendered_formats.clone(),
        });

        let delay = self.delays.read().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.write().unwrap().push(query.to_string());

        if self.fail_all || self.failures.read().unwrap().contains(query) {
            return Err(DiscoveryError::search(query, "mock search failure"));
        }

        let mut results = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        results.truncate(options.limit);
        Ok(results)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock page fetcher.
///
/// Unknown URLs return an error, as an unreachable page would.
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, FetchResponse>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response for a URL.
    pub fn with_page(self, url: &str, response: FetchResponse) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), response);
        self
    }

    /// Make a URL fail. Unknown URLs already fail; this documents intent.
    pub fn failing_on(self, url: &str) -> Self {
        self.pages.write().unwrap().remove(url);
        self
    }

    /// URLs fetched, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        self.calls.write().unwrap().push(url.to_string());

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| DiscoveryError::fetch(url, "mock fetch failure"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Record of a call made to [`MockExtractor`].
#[derive(Debug, Clone)]
pub struct ExtractCall {
    pub evidence: String,
    pub field_names: Vec<String>,
    pub context: EnrichmentContext,
}

/// A mock extraction engine returning a fixed response.
#[derive(Default, Clone)]
pub struct MockExtractor {
    response: Arc<RwLock<Enrichments>>,
    fail: bool,
    calls: Arc<RwLock<Vec<ExtractCall>>>,
}

impl MockExtractor {
    /// Create a mock that returns an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mapping returned by every call.
    pub fn with_response(self, response: Enrichments) -> Self {
        *self.response.write().unwrap() = response;
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<ExtractCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl FieldExtractor for MockExtractor {
    async fn extract(
        &self,
        evidence: &str,
        fields: &[Field],
        context: &EnrichmentContext,
    ) -> Result<Enrichments> {
        self.calls.write().unwrap().push(ExtractCall {
            evidence: evidence.to_string(),
            field_names: fields.iter().map(|f| f.name.clone()).collect(),
            context: context.clone(),
        });

        if self.fail {
            return Err(DiscoveryError::Extraction("mock extraction failure".into()));
        }

        Ok(self.response.read().unwrap().clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
