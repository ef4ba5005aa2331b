//! Anchor resolver.
//!
//! Locates the company's own profile page on the professional network.
//! A hit seeds the highest-trust tier of the query plan; a miss (or any
//! search failure) simply drops that tier.

use crate::traits::searcher::{SearchOptions, WebSearcher};
use crate::types::config::DiscoveryConfig;

/// Find the company's anchor profile URL.
///
/// Prefers the first company-namespace result whose URL contains the
/// hyphenated company name, then the first company-namespace result of any
/// name. Search errors are logged and treated as "not found".
pub async fn find_anchor_profile<S>(
    searcher: &S,
    config: &DiscoveryConfig,
    company_name: &str,
    company_domain: Option<&str>,
) -> Option<String>
where
    S: WebSearcher + ?Sized,
{
    let query = format!("site:{}/company \"{}\"", config.network_host, company_name);
    let options = SearchOptions::new(config.anchor_search_limit)
        .with_formats(config.rendered_formats.iter().cloned());

    let results = match searcher.search(&query, &options).await {
        Ok(results) => results,
        Err(e) => {
            tracing::warn!(
                company = %company_name,
                error = %e,
                "Anchor profile search failed"
            );
            return None;
        }
    };

    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    let anchor = select_anchor(&urls, company_name, &config.network_host);

    match &anchor {
        Some(url) => tracing::info!(
            company = %company_name,
            domain = ?company_domain,
            anchor = %url,
            "Resolved anchor profile"
        ),
        None => tracing::debug!(
            company = %company_name,
            results = results.len(),
            "No anchor profile found"
        ),
    }

    anchor
}

/// Pick the anchor from search result URLs, in relevance order.
///
/// The name match is a hyphenated substring check. It misses names with
/// punctuation or abbreviations and accepts common-word collisions.
pub fn select_anchor(urls: &[&str], company_name: &str, network_host: &str) -> Option<String> {
    let namespace = format!("{}/company/", network_host.to_lowercase());
    let slug = company_name.to_lowercase().replace(' ', "-");

    let in_namespace: Vec<&str> = urls
        .iter()
        .copied()
        .filter(|u| u.to_lowercase().contains(&namespace))
        .collect();

    in_namespace
        .iter()
        .find(|u| u.to_lowercase().contains(&slug))
        .or_else(|| in_namespace.first())
        .map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearcher;
    use crate::types::evidence::EvidenceRecord;

    const HOST: &str = "linkedin.com";

    #[test]
    fn test_select_prefers_name_match() {
        let urls = [
            "https://www.linkedin.com/company/acme-widgets",
            "https://www.linkedin.com/company/acme-corp",
        ];
        assert_eq!(
            select_anchor(&urls, "Acme Corp", HOST),
            Some("https://www.linkedin.com/company/acme-corp".to_string())
        );
    }

    #[test]
    fn test_select_falls_back_to_first_company_url() {
        let urls = [
            "https://www.linkedin.com/in/jane-doe",
            "https://www.linkedin.com/company/acmecorporation",
            "https://www.linkedin.com/company/other",
        ];
        assert_eq!(
            select_anchor(&urls, "Acme Corp", HOST),
            Some("https://www.linkedin.com/company/acmecorporation".to_string())
        );
    }

    #[test]
    fn test_select_ignores_other_namespaces() {
        let urls = ["https://www.linkedin.com/in/acme-corp", "https://acme.com"];
        assert_eq!(select_anchor(&urls, "Acme Corp", HOST), None);
        assert_eq!(select_anchor(&[], "Acme Corp", HOST), None);
    }

    #[tokio::test]
    async fn test_find_anchor_issues_scoped_query() {
        let searcher = MockSearcher::new().with_results(
            "site:linkedin.com/company \"Acme Corp\"",
            vec![EvidenceRecord::new("https://linkedin.com/company/acme-corp")],
        );

        let anchor =
            find_anchor_profile(&searcher, &DiscoveryConfig::default(), "Acme Corp", None).await;
        assert_eq!(
            anchor,
            Some("https://linkedin.com/company/acme-corp".to_string())
        );

        let calls = searcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].limit, 5);
        assert_eq!(calls[0].rendered_formats, vec!["markdown"]);
    }

    #[tokio::test]
    async fn test_find_anchor_swallows_errors() {
        let searcher = MockSearcher::new().failing_on("site:linkedin.com/company \"Acme\"");

        let anchor =
            find_anchor_profile(&searcher, &DiscoveryConfig::default(), "Acme", None).await;
        assert_eq!(anchor, None);
    }
}
