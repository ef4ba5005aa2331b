//! Evidence collector.
//!
//! Runs the query plan against the search provider and, when executive
//! fields are requested, tries the company's own leadership pages. Every
//! external call is its own recovery boundary: a failed query or fetch
//! contributes nothing and the batch carries on.

use futures::stream::{self, StreamExt};

use crate::traits::{
    fetcher::PageFetcher,
    searcher::{SearchOptions, WebSearcher},
};
use crate::types::{config::DiscoveryConfig, evidence::EvidenceRecord};

/// Title given to the synthetic record built from a direct leadership fetch.
pub const LEADERSHIP_PAGE_TITLE: &str = "Company Leadership Page";

/// Collect evidence for a query plan.
///
/// Output preserves query order, then within-query result order, with the
/// leadership page (if any) appended last. Searches may run concurrently up
/// to `config.max_concurrent_searches`; ordering is unaffected.
pub async fn collect_evidence<S, F>(
    searcher: &S,
    fetcher: &F,
    config: &DiscoveryConfig,
    queries: &[String],
    company_domain: Option<&str>,
    needs_executive_evidence: bool,
) -> Vec<EvidenceRecord>
where
    S: WebSearcher + ?Sized,
    F: PageFetcher + ?Sized,
{
    let options = SearchOptions::new(config.search_limit)
        .with_formats(config.rendered_formats.iter().cloned());

    let batches: Vec<Vec<EvidenceRecord>> = stream::iter(queries)
        .map(|query| search_one(searcher, query, &options))
        .buffered(config.max_concurrent_searches.max(1))
        .collect()
        .await;

    let mut records: Vec<EvidenceRecord> = batches.into_iter().flatten().collect();

    tracing::info!(
        queries = queries.len(),
        records = records.len(),
        searcher = searcher.name(),
        "Search evidence collected"
    );

    if needs_executive_evidence {
        if let Some(domain) = company_domain {
            if let Some(page) = fetch_leadership_page(fetcher, config, domain).await {
                records.push(page);
            }
        }
    }

    records
}

async fn search_one<S>(searcher: &S, query: &str, options: &SearchOptions) -> Vec<EvidenceRecord>
where
    S: WebSearcher + ?Sized,
{
    match searcher.search(query, options).await {
        Ok(results) => {
            tracing::debug!(query = %query, results = results.len(), "Search completed");
            results
        }
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "Search failed, skipping query");
            Vec::new()
        }
    }
}

/// Try each leadership path in order, stopping at the first usable page.
pub async fn fetch_leadership_page<F>(
    fetcher: &F,
    config: &DiscoveryConfig,
    domain: &str,
) -> Option<EvidenceRecord>
where
    F: PageFetcher + ?Sized,
{
    for path in &config.leadership_paths {
        let url = format!("https://{}/{}", domain, path.trim_start_matches('/'));

        match fetcher.fetch(&url).await {
            Ok(response) => match response.usable_content() {
                Some(content) => {
                    tracing::info!(url = %url, "Fetched company leadership page");
                    return Some(
                        EvidenceRecord::new(url)
                            .with_title(LEADERSHIP_PAGE_TITLE)
                            .with_markdown(content),
                    );
                }
                None => {
                    tracing::debug!(url = %url, "Leadership page empty or unsuccessful");
                }
            },
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Leadership page fetch failed");
            }
        }
    }

    None
}
