//! Top-level decision-maker discovery.
//!
//! `DecisionMakerPlanner` wires the stages together:
//!
//! ```text
//! classify → anchor → queries → collect → rank → dispatch
//! ```
//!
//! `execute` is fail-soft. It never returns an error; anything that escapes
//! the per-item recovery boundaries is logged once here and the caller gets
//! whatever results were assembled (usually none).

use serde::Serialize;

use super::{
    anchor::find_anchor_profile,
    classify::ClassifiedFields,
    collect::collect_evidence,
    dispatch::dispatch_extraction,
    queries::QuerySynthesizer,
    rank::{format_evidence, rank_evidence, RankPolicy},
};
use crate::error::Result;
use crate::traits::{extractor::FieldExtractor, fetcher::PageFetcher, searcher::WebSearcher};
use crate::types::{
    config::DiscoveryConfig,
    context::{CompanyIdentity, DiscoveryContext},
    field::Field,
    result::Enrichments,
};

/// The search plan for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    pub company_name: Option<String>,
    pub company_domain: Option<String>,
    pub anchor_url: Option<String>,
    pub needs_executive_evidence: bool,
    pub queries: Vec<String>,
}

/// Decision-maker discovery over pluggable search, fetch and extraction.
///
/// # Example
///
/// ```rust,ignore
/// use decision_makers::{DecisionMakerPlanner, DiscoveryContext, Field};
///
/// let planner = DecisionMakerPlanner::new(firecrawl.clone(), firecrawl, openai);
/// let context = DiscoveryContext::new()
///     .with_company_name("Acme Corp")
///     .with_company_domain("acme.com");
///
/// let found = planner
///     .execute(&[Field::new("ceo", "Chief Executive Officer")], &context)
///     .await;
/// ```
pub struct DecisionMakerPlanner<S, F, E> {
    searcher: S,
    fetcher: F,
    extractor: E,
    config: DiscoveryConfig,
    year: Option<i32>,
}

impl<S> DecisionMakerPlanner<S, (), ()>
where
    S: WebSearcher,
{
    /// A planner that can only build query plans; it has no fetcher or extractor.
    pub fn planning_only(searcher: S) -> Self {
        Self::new(searcher, (), ())
    }
}

impl<S, F, E> DecisionMakerPlanner<S, F, E> {
    /// Create a planner with default configuration.
    pub fn new(searcher: S, fetcher: F, extractor: E) -> Self {
        Self {
            searcher,
            fetcher,
            extractor,
            config: DiscoveryConfig::default(),
            year: None,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin the recency-marker year used in last-resort queries.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    fn synthesizer(&self) -> QuerySynthesizer {
        let synthesizer = QuerySynthesizer::new(self.config.network_host.clone());
        match self.year {
            Some(year) => synthesizer.with_year(year),
            None => synthesizer,
        }
    }
}

impl<S, F, E> DecisionMakerPlanner<S, F, E>
where
    S: WebSearcher,
{
    /// Resolve the anchor profile and synthesize the query plan.
    ///
    /// Issues at most one search (the anchor lookup). Returns an empty plan
    /// without any calls when no company name or domain can be resolved.
    pub async fn plan(&self, fields: &[Field], context: &DiscoveryContext) -> QueryPlan {
        let identity = CompanyIdentity::resolve(context);
        if identity.is_empty() {
            return QueryPlan::default();
        }
        self.plan_for(fields, &identity).await
    }

    async fn plan_for(&self, fields: &[Field], identity: &CompanyIdentity) -> QueryPlan {
        let classified = ClassifiedFields::partition(fields);

        let anchor_url = match identity.name() {
            Some(name) => {
                find_anchor_profile(&self.searcher, &self.config, name, identity.domain()).await
            }
            None => None,
        };

        let queries = self.synthesizer().build_queries(
            fields,
            identity.name(),
            identity.domain(),
            anchor_url.as_deref(),
        );

        QueryPlan {
            company_name: identity.name.clone(),
            company_domain: identity.domain.clone(),
            anchor_url,
            needs_executive_evidence: classified.needs_executive_evidence(),
            queries,
        }
    }
}

impl<S, F, E> DecisionMakerPlanner<S, F, E>
where
    S: WebSearcher,
    F: PageFetcher,
    E: FieldExtractor,
{
    /// Discover values for `fields`.
    ///
    /// Returns only fields with evidence-backed, non-empty values. A missing
    /// field means "not found", whatever the cause.
    pub async fn execute(&self, fields: &[Field], context: &DiscoveryContext) -> Enrichments {
        let identity = CompanyIdentity::resolve(context);
        if identity.is_empty() {
            tracing::info!("No company name or domain available, skipping discovery");
            return Enrichments::new();
        }

        let mut results = Enrichments::new();

        if let Err(e) = self.run(fields, context, &identity, &mut results).await {
            tracing::error!(
                company = ?identity.name(),
                domain = ?identity.domain(),
                error = %e,
                "Decision-maker discovery failed"
            );
        }

        results
    }

    async fn run(
        &self,
        fields: &[Field],
        context: &DiscoveryContext,
        identity: &CompanyIdentity,
        results: &mut Enrichments,
    ) -> Result<()> {
        self.config.validate()?;

        let plan = self.plan_for(fields, identity).await;

        tracing::info!(
            company = ?identity.name(),
            domain = ?identity.domain(),
            anchor = ?plan.anchor_url,
            queries = plan.queries.len(),
            "Starting decision-maker discovery"
        );

        let records = collect_evidence(
            &self.searcher,
            &self.fetcher,
            &self.config,
            &plan.queries,
            identity.domain(),
            plan.needs_executive_evidence,
        )
        .await;

        let policy = RankPolicy {
            company_domain: identity.domain(),
            network_host: &self.config.network_host,
            max_evidence: self.config.max_evidence,
        };
        let ranked = rank_evidence(records, &policy);

        if ranked.is_empty() {
            tracing::info!("No evidence collected, nothing to extract");
            return Ok(());
        }

        let evidence = format_evidence(&ranked);

        let extracted = dispatch_extraction(
            &self.extractor,
            &evidence,
            fields,
            identity,
            plan.anchor_url.as_deref(),
            context,
        )
        .await?;

        results.extend(extracted);
        Ok(())
    }
}
