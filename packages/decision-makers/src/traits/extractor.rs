//! Field extractor trait for LLM-backed structured extraction.
//!
//! The planner never interprets field values; it assembles the evidence
//! text and context, then hands both to an implementation of this trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{context::EnrichmentContext, field::Field, result::Enrichments};

/// Structured-data extraction engine.
///
/// Implementations wrap specific LLM providers and handle prompting and
/// response parsing. Errors propagate to the planner's top-level catch.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Fill in `fields` from `evidence`, guided by `context`.
    ///
    /// Returns field name to result. Fields with no answer may be omitted
    /// or returned with an empty value.
    async fn extract(
        &self,
        evidence: &str,
        fields: &[Field],
        context: &EnrichmentContext,
    ) -> Result<Enrichments>;

    /// Get the extractor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
