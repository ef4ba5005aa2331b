//! Decision-Maker Discovery
//!
//! Finds a company's current leadership (and other requested attributes) by
//! planning searches, collecting evidence and handing the best of it to an
//! extraction engine.
//!
//! # Strategy
//!
//! **Anchor first, then broaden.**
//!
//! - Locate the company's official profile on the professional network
//! - Search individual profiles scoped to that company
//! - Broaden to title searches, the company's own site, then the open web
//! - Rank evidence by trust, dedupe by URL, cap the set
//! - Let the extraction engine fill in typed values under a strict
//!   no-speculation policy
//!
//! # Usage
//!
//! ```rust,ignore
//! use decision_makers::{DecisionMakerPlanner, DiscoveryContext, Field};
//! use decision_makers::providers::{FirecrawlClient, OpenAIExtractor};
//!
//! let firecrawl = FirecrawlClient::from_env()?;
//! let planner = DecisionMakerPlanner::new(firecrawl.clone(), firecrawl, OpenAIExtractor::from_env()?);
//!
//! let context = DiscoveryContext::new()
//!     .with_company_name("Acme Corp")
//!     .with_company_domain("acme.com");
//! let found = planner
//!     .execute(&[Field::new("ceo", "Chief Executive Officer")], &context)
//!     .await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (WebSearcher, PageFetcher, FieldExtractor)
//! - [`types`] - Fields, evidence, context and results
//! - [`pipeline`] - Classification, query planning, collection, ranking, dispatch
//! - [`providers`] - Firecrawl and OpenAI implementations
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod providers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{DiscoveryError, Result};
pub use traits::{
    extractor::FieldExtractor,
    fetcher::{FetchResponse, PageFetcher},
    searcher::{SearchOptions, WebSearcher},
};
pub use types::{
    config::DiscoveryConfig,
    context::{CompanyIdentity, DiscoveryContext, EmailContext, EnrichmentContext},
    evidence::{EvidenceRecord, TrustTier},
    field::{Field, FieldClass},
    result::{EnrichmentResult, Enrichments},
};

// Re-export the planner
pub use pipeline::{DecisionMakerPlanner, QueryPlan};

// Re-export testing utilities
pub use testing::{MockExtractor, MockFetcher, MockSearcher};
