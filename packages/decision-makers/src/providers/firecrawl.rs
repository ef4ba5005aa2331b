//! Firecrawl-backed search and page fetching.
//!
//! Firecrawl's `/search` endpoint returns rendered markdown alongside each
//! hit, and `/scrape` renders a single page with JavaScript, which covers
//! both the search and fetch collaborators with one client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{DiscoveryError, Result};
use crate::security::SecretString;
use crate::traits::{
    fetcher::{FetchResponse, PageFetcher},
    searcher::{SearchOptions, WebSearcher},
};
use crate::types::evidence::EvidenceRecord;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Firecrawl API client implementing [`WebSearcher`] and [`PageFetcher`].
///
/// # Example
///
/// ```rust,ignore
/// use decision_makers::providers::FirecrawlClient;
///
/// let firecrawl = FirecrawlClient::from_env()?;
/// let planner = DecisionMakerPlanner::new(firecrawl.clone(), firecrawl, extractor);
/// ```
#[derive(Clone)]
pub struct FirecrawlClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

// Request/Response types for Firecrawl API

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    limit: usize,
    #[serde(rename = "scrapeOptions", skip_serializing_if = "Option::is_none")]
    scrape_options: Option<ScrapeOptions<'a>>,
}

#[derive(Serialize)]
struct ScrapeOptions<'a> {
    formats: &'a [String],
}

#[derive(Deserialize)]
struct SearchResponse {
    success: bool,
    #[serde(default)]
    data: Vec<SearchData>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SearchData {
    url: Option<String>,
    title: Option<String>,
    description: Option<String>,
    markdown: Option<String>,
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: Vec<&'a str>,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    success: bool,
    data: Option<ScrapeData>,
}

#[derive(Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    metadata: Option<PageMetadata>,
}

#[derive(Deserialize)]
struct PageMetadata {
    title: Option<String>,
}

impl FirecrawlClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_key(SecretString::new(api_key))
    }

    /// Create from environment variable `FIRECRAWL_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::with_key(SecretString::from_env("FIRECRAWL_API_KEY")?)
    }

    fn with_key(api_key: SecretString) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| DiscoveryError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }

    /// Set a custom base URL (self-hosted Firecrawl, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    async fn post<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<R> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.api_key.bearer())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| DiscoveryError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::Http(
                format!("Firecrawl API error: {} - {}", status, text).into(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DiscoveryError::Http(Box::new(e)))
    }
}

/// Convert one search hit to an evidence record. Hits without a URL are dropped.
fn search_data_to_record(data: SearchData) -> Option<EvidenceRecord> {
    let url = data.url.filter(|u| !u.trim().is_empty())?;

    Some(EvidenceRecord {
        url,
        title: data.title,
        markdown: data.markdown,
        content: data.description,
    })
}

fn scrape_response_to_fetch(response: ScrapeResponse) -> FetchResponse {
    let data = response.data;
    FetchResponse {
        success: response.success,
        title: data
            .as_ref()
            .and_then(|d| d.metadata.as_ref())
            .and_then(|m| m.title.clone()),
        rendered_content: data.and_then(|d| d.markdown),
    }
}

#[async_trait]
impl WebSearcher for FirecrawlClient {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<EvidenceRecord>> {
        let request = SearchRequest {
            query,
            limit: options.limit,
            scrape_options: (!options.rendered_formats.is_empty()).then(|| ScrapeOptions {
                formats: &options.rendered_formats,
            }),
        };

        let response: SearchResponse = self
            .post("/search", &request)
            .await
            .map_err(|e| DiscoveryError::search(query, e))?;

        if !response.success {
            return Err(DiscoveryError::search(
                query,
                response
                    .error
                    .unwrap_or_else(|| "Firecrawl search failed".to_string()),
            ));
        }

        let records: Vec<EvidenceRecord> = response
            .data
            .into_iter()
            .filter_map(search_data_to_record)
            .take(options.limit)
            .collect();

        tracing::debug!(query = %query, results = records.len(), "Firecrawl search");
        Ok(records)
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

#[async_trait]
impl PageFetcher for FirecrawlClient {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        url::Url::parse(url).map_err(|_| DiscoveryError::InvalidUrl {
            url: url.to_string(),
        })?;

        let request = ScrapeRequest {
            url,
            formats: vec!["markdown"],
        };

        let response: ScrapeResponse = self
            .post("/scrape", &request)
            .await
            .map_err(|e| DiscoveryError::fetch(url, e))?;

        Ok(scrape_response_to_fetch(response))
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = FirecrawlClient::new("test-key").unwrap();
        assert_eq!(WebSearcher::name(&client), "firecrawl");
        assert_eq!(client.base_url, FIRECRAWL_API_URL);
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_url() {
        let client = FirecrawlClient::new("k").unwrap();
        let err = client.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidUrl { .. }));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = FirecrawlClient::new("k")
            .unwrap()
            .with_base_url("http://localhost:3002/v1/");
        assert_eq!(client.base_url, "http://localhost:3002/v1");
    }

    #[test]
    fn test_search_request_shape() {
        let formats = vec!["markdown".to_string()];
        let request = SearchRequest {
            query: "\"Acme\" executives",
            limit: 3,
            scrape_options: Some(ScrapeOptions { formats: &formats }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "query": "\"Acme\" executives",
                "limit": 3,
                "scrapeOptions": {"formats": ["markdown"]}
            })
        );
    }

    #[test]
    fn test_search_response_to_records() {
        let body = r##"{
            "success": true,
            "data": [
                {"url": "https://linkedin.com/in/jane", "title": "Jane Doe - CEO", "description": "CEO at Acme", "markdown": "# Jane"},
                {"url": "", "title": "broken"},
                {"url": "https://acme.com/about", "description": "About Acme"}
            ]
        }"##;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let records: Vec<_> = response
            .data
            .into_iter()
            .filter_map(search_data_to_record)
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].body(), "# Jane");
        assert_eq!(records[0].title.as_deref(), Some("Jane Doe - CEO"));
        assert_eq!(records[1].body(), "About Acme");
    }

    #[test]
    fn test_scrape_response_to_fetch() {
        let body = r##"{"success": true, "data": {"markdown": "# Team", "metadata": {"title": "Our Team"}}}"##;
        let response: ScrapeResponse = serde_json::from_str(body).unwrap();
        let fetched = scrape_response_to_fetch(response);

        assert_eq!(fetched.usable_content(), Some("# Team"));
        assert_eq!(fetched.title.as_deref(), Some("Our Team"));

        let failed: ScrapeResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(scrape_response_to_fetch(failed).usable_content(), None);
    }
}
