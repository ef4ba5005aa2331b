//! Caller context, resolved company identity and the extraction context.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Context keys set by the dispatcher before the caller's own context is
/// spread on top.
pub mod keys {
    pub const COMPANY_NAME: &str = "companyName";
    pub const COMPANY_DOMAIN: &str = "companyDomain";
    pub const TARGET_DOMAIN: &str = "targetDomain";
    pub const ANCHOR_PROFILE_URL: &str = "anchorProfileUrl";
    pub const INSTRUCTIONS: &str = "instructions";
}

/// Hints derived from an inbound email (sender domain, signature guess).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name_guess: Option<String>,
}

/// Context supplied by the caller of [`crate::DecisionMakerPlanner::execute`].
///
/// Unknown keys are kept in `extra` and forwarded to the extraction engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryContext {
    /// Explicit company name (highest precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Free-form data discovered upstream; `companyName` is read as fallback
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub discovered_data: Map<String, Value>,

    /// Email-derived hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_context: Option<EmailContext>,

    /// Anything else the caller passes through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DiscoveryContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit company name.
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    /// Set the email-derived company domain.
    pub fn with_company_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_context
            .get_or_insert_with(EmailContext::default)
            .company_domain = Some(domain.into());
        self
    }

    /// Set the email-derived company name guess.
    pub fn with_company_name_guess(mut self, guess: impl Into<String>) -> Self {
        self.email_context
            .get_or_insert_with(EmailContext::default)
            .company_name_guess = Some(guess.into());
        self
    }

    /// Add a discovered-data entry.
    pub fn with_discovered(mut self, key: impl Into<String>, value: Value) -> Self {
        self.discovered_data.insert(key.into(), value);
        self
    }

    /// Add a pass-through entry.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Serialize to a JSON object, omitting absent fields.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Company identity resolved from a [`DiscoveryContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyIdentity {
    pub name: Option<String>,
    pub domain: Option<String>,
}

impl CompanyIdentity {
    /// Build an identity directly.
    pub fn new(name: Option<&str>, domain: Option<&str>) -> Self {
        Self {
            name: name.and_then(non_empty),
            domain: domain.and_then(normalize_domain),
        }
    }

    /// Resolve name and domain with precedence
    /// `companyName` > `discoveredData.companyName` > `emailContext.companyNameGuess`.
    pub fn resolve(context: &DiscoveryContext) -> Self {
        let email = context.email_context.as_ref();

        let name = context
            .company_name
            .as_deref()
            .and_then(non_empty)
            .or_else(|| {
                context
                    .discovered_data
                    .get(keys::COMPANY_NAME)
                    .and_then(Value::as_str)
                    .and_then(non_empty)
            })
            .or_else(|| {
                email
                    .and_then(|e| e.company_name_guess.as_deref())
                    .and_then(non_empty)
            });

        let domain = email
            .and_then(|e| e.company_domain.as_deref())
            .and_then(normalize_domain);

        Self { name, domain }
    }

    /// True when neither name nor domain is known.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.domain.is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Reduce a domain-ish string to a bare lower-cased host.
///
/// Accepts `acme.com`, `https://www.acme.com/`, `acme.com/about`.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    url::Url::parse(&with_scheme)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .filter(|h| !h.is_empty())
}

/// Context handed to the extraction engine.
///
/// Built-in keys are written first and the caller's context is spread on
/// top, so caller values win on key collision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichmentContext {
    fields: Map<String, Value>,
}

impl EnrichmentContext {
    /// Assemble the context for one invocation.
    pub fn build(
        identity: &CompanyIdentity,
        anchor_url: Option<&str>,
        instruction: &str,
        caller: &DiscoveryContext,
    ) -> Self {
        let optional = |v: Option<&str>| v.map_or(Value::Null, |s| Value::String(s.to_string()));

        let mut fields = Map::new();
        fields.insert(keys::COMPANY_NAME.into(), optional(identity.name()));
        fields.insert(keys::COMPANY_DOMAIN.into(), optional(identity.domain()));
        fields.insert(keys::TARGET_DOMAIN.into(), optional(identity.domain()));
        fields.insert(keys::ANCHOR_PROFILE_URL.into(), optional(anchor_url));
        fields.insert(keys::INSTRUCTIONS.into(), Value::String(instruction.to_string()));

        fields.extend(caller.to_map());

        Self { fields }
    }

    /// Look up a context value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn company_name(&self) -> Option<&str> {
        self.get_str(keys::COMPANY_NAME)
    }

    pub fn company_domain(&self) -> Option<&str> {
        self.get_str(keys::COMPANY_DOMAIN)
    }

    pub fn anchor_url(&self) -> Option<&str> {
        self.get_str(keys::ANCHOR_PROFILE_URL)
    }

    pub fn instructions(&self) -> Option<&str> {
        self.get_str(keys::INSTRUCTIONS)
    }

    /// Borrow the full key/value view.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_name_wins() {
        let ctx = DiscoveryContext::new()
            .with_company_name("Acme Corp")
            .with_discovered("companyName", json!("Acme Discovered"))
            .with_company_name_guess("Acme Guess");

        assert_eq!(CompanyIdentity::resolve(&ctx).name(), Some("Acme Corp"));
    }

    #[test]
    fn test_discovered_name_before_guess() {
        let ctx = DiscoveryContext::new()
            .with_discovered("companyName", json!("Acme Discovered"))
            .with_company_name_guess("Acme Guess");

        assert_eq!(CompanyIdentity::resolve(&ctx).name(), Some("Acme Discovered"));
    }

    #[test]
    fn test_guess_used_last_and_blank_names_skipped() {
        let ctx = DiscoveryContext::new()
            .with_company_name("   ")
            .with_discovered("companyName", json!(""))
            .with_company_name_guess("Acme Guess");

        assert_eq!(CompanyIdentity::resolve(&ctx).name(), Some("Acme Guess"));
    }

    #[test]
    fn test_empty_identity() {
        let identity = CompanyIdentity::resolve(&DiscoveryContext::new());
        assert!(identity.is_empty());
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("acme.com"), Some("acme.com".to_string()));
        assert_eq!(
            normalize_domain("https://www.Acme.com/"),
            Some("www.acme.com".to_string())
        );
        assert_eq!(normalize_domain("acme.com/about"), Some("acme.com".to_string()));
        assert_eq!(normalize_domain("  "), None);
    }

    #[test]
    fn test_caller_context_wins_on_collision() {
        let identity = CompanyIdentity::new(Some("Acme Corp"), Some("acme.com"));
        let caller = DiscoveryContext::new()
            .with_company_name("Acme Corporation")
            .with_extra("targetDomain", json!("acme.io"));

        let ctx = EnrichmentContext::build(&identity, None, "be careful", &caller);

        assert_eq!(ctx.company_name(), Some("Acme Corporation"));
        assert_eq!(ctx.get("targetDomain"), Some(&json!("acme.io")));
        assert_eq!(ctx.company_domain(), Some("acme.com"));
        assert_eq!(ctx.get("anchorProfileUrl"), Some(&Value::Null));
        assert_eq!(ctx.instructions(), Some("be careful"));
    }

    #[test]
    fn test_absent_caller_name_does_not_clobber_resolved_name() {
        let identity = CompanyIdentity::new(Some("Acme Guess"), None);
        let caller = DiscoveryContext::new().with_company_name_guess("Acme Guess");

        let ctx = EnrichmentContext::build(&identity, None, "", &caller);

        assert_eq!(ctx.company_name(), Some("Acme Guess"));
        assert!(ctx.get("emailContext").is_some());
    }
}
