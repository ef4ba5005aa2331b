//! Integration tests for the full discovery flow.
//!
//! These tests drive `DecisionMakerPlanner` end to end with mock
//! collaborators:
//! 1. Resolve identity and anchor profile
//! 2. Synthesize the tiered query plan
//! 3. Collect and rank evidence
//! 4. Dispatch extraction and filter empty values

use decision_makers::{
    testing::{MockExtractor, MockFetcher, MockSearcher},
    DecisionMakerPlanner, DiscoveryContext, EnrichmentResult, Enrichments, EvidenceRecord,
    FetchResponse, Field,
};
use serde_json::json;

const ANCHOR_QUERY: &str = "site:linkedin.com/company \"Acme Corp\"";
const ANCHOR_URL: &str = "https://linkedin.com/company/acme-corp";

fn acme_context() -> DiscoveryContext {
    DiscoveryContext::new()
        .with_company_name("Acme Corp")
        .with_company_domain("acme.com")
}

fn ceo_field() -> Vec<Field> {
    vec![Field::new("ceo", "Chief Executive Officer")]
}

fn response(entries: &[(&str, &str)]) -> Enrichments {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), EnrichmentResult::new(*v)))
        .collect()
}

#[tokio::test]
async fn test_missing_identity_returns_empty_without_calls() {
    let planner = DecisionMakerPlanner::new(
        MockSearcher::new(),
        MockFetcher::new(),
        MockExtractor::new().with_response(response(&[("ceo", "Jane Doe")])),
    );

    let context = DiscoveryContext::new()
        .with_discovered("industry", json!("Manufacturing"))
        .with_extra("requestId", json!("abc"));

    let results = planner.execute(&ceo_field(), &context).await;

    assert!(results.is_empty());
    assert!(planner.searcher().calls().is_empty());
    assert!(planner.fetcher().calls().is_empty());
    assert!(planner.extractor().calls().is_empty());
}

#[tokio::test]
async fn test_anchor_scoped_plan_for_ceo() {
    let searcher = MockSearcher::new().with_urls(ANCHOR_QUERY, &[ANCHOR_URL]);
    let planner = DecisionMakerPlanner::new(searcher, MockFetcher::new(), MockExtractor::new())
        .with_year(2026);

    let plan = planner.plan(&ceo_field(), &acme_context()).await;

    assert_eq!(plan.anchor_url.as_deref(), Some(ANCHOR_URL));
    assert_eq!(plan.queries[0], "site:linkedin.com/in \"acme corp\" (\"CEO\")");
    assert_eq!(plan.queries[1], "site:linkedin.com/in \"Acme Corp\" (\"CEO\")");
    assert!(plan.queries.contains(&"site:acme.com about-us".to_string()));
    assert!(plan.queries.last().unwrap().contains("2026"));
}

#[tokio::test]
async fn test_execute_searches_anchor_then_full_plan() {
    let searcher = MockSearcher::new().with_urls(ANCHOR_QUERY, &[ANCHOR_URL]);
    let planner = DecisionMakerPlanner::new(searcher, MockFetcher::new(), MockExtractor::new())
        .with_year(2026);

    let plan = planner.plan(&ceo_field(), &acme_context()).await;
    planner.execute(&ceo_field(), &acme_context()).await;

    // plan() issued one anchor search, execute() another plus the whole plan
    let queries = planner.searcher().queries();
    assert_eq!(queries.len(), 2 + plan.queries.len());
    assert_eq!(queries[1], ANCHOR_QUERY);
    for query in &plan.queries {
        assert!(queries[2..].contains(query), "missing query: {}", query);
    }
}

#[tokio::test]
async fn test_duplicate_urls_survive_once_in_evidence() {
    let searcher = MockSearcher::new()
        .with_results(
            "\"Acme Corp\" leadership team",
            vec![EvidenceRecord::new("https://news.com/acme").with_markdown("ALPHA VERSION")],
        )
        .with_results(
            "\"Acme Corp\" executives",
            vec![EvidenceRecord::new("https://news.com/acme").with_markdown("BETA VERSION")],
        );
    let planner = DecisionMakerPlanner::new(searcher, MockFetcher::new(), MockExtractor::new())
        .with_year(2026);

    let context = DiscoveryContext::new().with_company_name("Acme Corp");
    planner.execute(&ceo_field(), &context).await;

    let calls = planner.extractor().calls();
    assert_eq!(calls.len(), 1);
    let evidence = &calls[0].evidence;
    assert_eq!(evidence.matches("Source: https://news.com/acme").count(), 1);
    assert!(evidence.contains("ALPHA VERSION"));
    assert!(!evidence.contains("BETA VERSION"));
}

#[tokio::test]
async fn test_all_leadership_fetches_fail() {
    let searcher = MockSearcher::new()
        .with_urls("\"Acme Corp\" executives", &["https://news.com/acme-execs"]);
    let fetcher = MockFetcher::new()
        .failing_on("https://acme.com/about")
        .failing_on("https://acme.com/team")
        .failing_on("https://acme.com/leadership");
    let planner = DecisionMakerPlanner::new(
        searcher,
        fetcher,
        MockExtractor::new().with_response(response(&[("ceo", "Jane Doe")])),
    );

    let results = planner.execute(&ceo_field(), &acme_context()).await;

    assert_eq!(results["ceo"].value, json!("Jane Doe"));
    assert_eq!(planner.fetcher().calls().len(), 3);

    let evidence = &planner.extractor().calls()[0].evidence;
    assert!(evidence.contains("https://news.com/acme-execs"));
    assert!(!evidence.contains("Company Leadership Page"));
}

#[tokio::test]
async fn test_leadership_page_reaches_extractor() {
    let fetcher = MockFetcher::new()
        .with_page("https://acme.com/about", FetchResponse::ok("Jane Doe, CEO"));
    let planner = DecisionMakerPlanner::new(MockSearcher::new(), fetcher, MockExtractor::new());

    planner.execute(&ceo_field(), &acme_context()).await;

    let calls = planner.extractor().calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].evidence.contains("Title: Company Leadership Page"));
    assert!(calls[0].evidence.contains("Jane Doe, CEO"));
    assert_eq!(planner.fetcher().calls(), vec!["https://acme.com/about"]);
}

#[tokio::test]
async fn test_empty_values_are_omitted() {
    let searcher = MockSearcher::new()
        .with_urls("\"Acme Corp\" executives", &["https://news.com/acme"]);
    let planner = DecisionMakerPlanner::new(
        searcher,
        MockFetcher::new(),
        MockExtractor::new().with_response(response(&[("ceo", ""), ("founder", "Jane Doe")])),
    );

    let fields = vec![
        Field::new("ceo", "Chief Executive Officer"),
        Field::new("founder", "Company founder"),
    ];
    let results = planner.execute(&fields, &acme_context()).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results["founder"].value, json!("Jane Doe"));
    assert!(!results.contains_key("ceo"));
}

#[tokio::test]
async fn test_every_search_failing_still_returns_mapping() {
    let planner = DecisionMakerPlanner::new(
        MockSearcher::new().failing(),
        MockFetcher::new(),
        MockExtractor::new().with_response(response(&[("ceo", "Jane Doe")])),
    );

    let results = planner.execute(&ceo_field(), &acme_context()).await;

    assert!(results.is_empty());
    assert!(planner.extractor().calls().is_empty());
}

#[tokio::test]
async fn test_network_evidence_ordered_first() {
    let searcher = MockSearcher::new()
        .with_urls(ANCHOR_QUERY, &[ANCHOR_URL])
        .with_urls(
            "\"Acme Corp\" leadership team",
            &["https://news.com/acme", "https://acme.com/team"],
        )
        .with_urls(
            "\"Acme Corp\" executives",
            &["https://linkedin.com/in/jane-doe"],
        );
    let planner = DecisionMakerPlanner::new(searcher, MockFetcher::new(), MockExtractor::new());

    let context = DiscoveryContext::new().with_company_name("Acme Corp");
    planner.execute(&ceo_field(), &context).await;

    let evidence = &planner.extractor().calls()[0].evidence;
    let profile = evidence.find("https://linkedin.com/in/jane-doe").unwrap();
    let news = evidence.find("https://news.com/acme").unwrap();
    assert!(profile < news);
}

#[tokio::test]
async fn test_caller_context_forwarded_to_extractor() {
    let searcher = MockSearcher::new()
        .with_urls("\"Acme Corp\" executives", &["https://news.com/acme"]);
    let planner = DecisionMakerPlanner::new(searcher, MockFetcher::new(), MockExtractor::new());

    let context = DiscoveryContext::new()
        .with_discovered("companyName", json!("Acme Corp"))
        .with_extra("targetDomain", json!("override.example"));
    planner.execute(&ceo_field(), &context).await;

    let ctx = &planner.extractor().calls()[0].context;
    assert_eq!(ctx.company_name(), Some("Acme Corp"));
    assert_eq!(ctx.get("targetDomain"), Some(&json!("override.example")));
    assert!(ctx.instructions().is_some());
}
