//! Extraction dispatcher.
//!
//! Builds the enrichment context, calls the extraction engine, and keeps
//! only fields that came back with a value.

use super::prompts::VERIFICATION_INSTRUCTIONS;
use crate::error::Result;
use crate::traits::extractor::FieldExtractor;
use crate::types::{
    context::{CompanyIdentity, DiscoveryContext, EnrichmentContext},
    field::Field,
    result::Enrichments,
};

/// Call the extraction engine and drop empty values.
///
/// Engine errors propagate; empty values are dropped silently.
pub async fn dispatch_extraction<E>(
    extractor: &E,
    evidence: &str,
    fields: &[Field],
    identity: &CompanyIdentity,
    anchor_url: Option<&str>,
    caller: &DiscoveryContext,
) -> Result<Enrichments>
where
    E: FieldExtractor + ?Sized,
{
    let context = EnrichmentContext::build(identity, anchor_url, VERIFICATION_INSTRUCTIONS, caller);

    let raw = extractor.extract(evidence, fields, &context).await?;
    let returned = raw.len();

    let kept: Enrichments = raw.into_iter().filter(|(_, r)| r.has_value()).collect();

    tracing::info!(
        extractor = extractor.name(),
        returned,
        kept = kept.len(),
        "Extraction completed"
    );

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockExtractor;
    use crate::types::result::EnrichmentResult;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_values_dropped() {
        let mut response = Enrichments::new();
        response.insert("ceo".to_string(), EnrichmentResult::new(""));
        response.insert("founder".to_string(), EnrichmentResult::new("Jane Doe"));
        let extractor = MockExtractor::new().with_response(response);

        let identity = CompanyIdentity::new(Some("Acme Corp"), Some("acme.com"));
        let fields = vec![Field::new("ceo", ""), Field::new("founder", "")];

        let results = dispatch_extraction(
            &extractor,
            "evidence",
            &fields,
            &identity,
            None,
            &DiscoveryContext::new(),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results["founder"].value, json!("Jane Doe"));
    }

    #[tokio::test]
    async fn test_context_carries_identity_and_anchor() {
        let extractor = MockExtractor::new();
        let identity = CompanyIdentity::new(Some("Acme Corp"), Some("acme.com"));
        let caller = DiscoveryContext::new().with_extra("requestId", json!("r-1"));

        dispatch_extraction(
            &extractor,
            "evidence text",
            &[Field::new("ceo", "")],
            &identity,
            Some("https://linkedin.com/company/acme-corp"),
            &caller,
        )
        .await
        .unwrap();

        let calls = extractor.calls();
        assert_eq!(calls.len(), 1);
        let ctx = &calls[0].context;
        assert_eq!(ctx.company_name(), Some("Acme Corp"));
        assert_eq!(ctx.company_domain(), Some("acme.com"));
        assert_eq!(ctx.get("targetDomain"), Some(&json!("acme.com")));
        assert_eq!(ctx.anchor_url(), Some("https://linkedin.com/company/acme-corp"));
        assert_eq!(ctx.instructions(), Some(VERIFICATION_INSTRUCTIONS));
        assert_eq!(ctx.get("requestId"), Some(&json!("r-1")));
        assert_eq!(calls[0].evidence, "evidence text");
        assert_eq!(calls[0].field_names, vec!["ceo"]);
    }

    #[tokio::test]
    async fn test_engine_error_propagates() {
        let extractor = MockExtractor::new().failing();
        let result = dispatch_extraction(
            &extractor,
            "evidence",
            &[],
            &CompanyIdentity::default(),
            None,
            &DiscoveryContext::new(),
        )
        .await;

        assert!(result.is_err());
    }
}
