//! Query synthesizer.
//!
//! Produces the ordered search plan. Executive queries come in four trust
//! tiers, highest first:
//!
//! 1. Anchor-scoped people profiles (verified current employment)
//! 2. Company-name title searches
//! 3. Company-domain team/about pages
//! 4. Open-web last resort with a recency marker
//!
//! Non-executive fields follow, each as a name-scoped then domain-scoped
//! query. The order of the returned list is significant: downstream ranking
//! breaks ties by it.

use chrono::{Datelike, Utc};

use super::classify::{search_terms, ClassifiedFields};
use crate::types::field::Field;

/// Builds the ordered query plan for one invocation.
#[derive(Debug, Clone)]
pub struct QuerySynthesizer {
    network_host: String,
    year: i32,
}

impl QuerySynthesizer {
    /// Create a synthesizer for the given professional network host.
    pub fn new(network_host: impl Into<String>) -> Self {
        Self {
            network_host: network_host.into(),
            year: Utc::now().year(),
        }
    }

    /// Pin the recency-marker year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Recency-marker year in use.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Build the ordered query list.
    pub fn build_queries(
        &self,
        fields: &[Field],
        company_name: Option<&str>,
        company_domain: Option<&str>,
        anchor_url: Option<&str>,
    ) -> Vec<String> {
        let classified = ClassifiedFields::partition(fields);
        let titles = classified.canonical_titles();
        let mut queries = Vec::new();

        if !titles.is_empty() {
            self.executive_queries(&titles, company_name, company_domain, anchor_url, &mut queries);
        }

        for field in &classified.other {
            let terms = search_terms(field);
            if let Some(name) = company_name {
                queries.push(format!("\"{}\" {}", name, terms));
            }
            if let Some(domain) = company_domain {
                queries.push(format!("site:{} {}", domain, terms));
            }
        }

        tracing::debug!(
            executive_titles = titles.len(),
            other_fields = classified.other.len(),
            queries = queries.len(),
            has_anchor = anchor_url.is_some(),
            "Synthesized query plan"
        );

        queries
    }

    fn executive_queries(
        &self,
        titles: &[String],
        company_name: Option<&str>,
        company_domain: Option<&str>,
        anchor_url: Option<&str>,
        queries: &mut Vec<String>,
    ) {
        let title_clause = titles
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(" OR ");

        // Tier 1: people profiles scoped to the anchor company
        if let Some(anchor) = anchor_url {
            if let Some(anchor_name) = anchor_company_name(anchor) {
                queries.push(self.profile_query(&anchor_name, &title_clause));
            }
            if let Some(name) = company_name {
                queries.push(self.profile_query(name, &title_clause));
            }
        }

        // Tier 2: title searches by company name
        if let Some(name) = company_name {
            for title in titles {
                queries.push(format!("\"{}\" at \"{}\" current", title, name));
            }
            queries.push(format!("\"{}\" leadership team", name));
            queries.push(format!("\"{}\" executives", name));
        }

        // Tier 3: the company's own site
        if let Some(domain) = company_domain {
            queries.push(format!(
                "site:{} team OR leadership OR about OR executives",
                domain
            ));
            queries.push(format!("site:{} about-us", domain));
        }

        // Tier 4: open web
        if let Some(name) = company_name {
            queries.push(format!(
                "\"{}\" {} {}",
                name,
                titles.join(" OR "),
                self.year
            ));
        }
    }

    fn profile_query(&self, company: &str, title_clause: &str) -> String {
        format!(
            "site:{}/in \"{}\" ({})",
            self.network_host, company, title_clause
        )
    }
}

/// Company name implied by an anchor profile URL.
///
/// Takes the path segment after `/company/` and turns hyphens into spaces:
/// `https://linkedin.com/company/acme-corp/about` gives `acme corp`.
pub fn anchor_company_name(anchor_url: &str) -> Option<String> {
    const MARKER: &str = "/company/";

    let start = anchor_url.find(MARKER)? + MARKER.len();
    let slug = anchor_url[start..]
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("");

    let name = slug.replace('-', " ").trim().to_string();
    (!name.is_empty()).then_some(name)
}
