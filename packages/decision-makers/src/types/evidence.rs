//! Evidence records and trust tiers.

use serde::{Deserialize, Serialize};

/// Placeholder title used when an evidence record has none.
pub const UNTITLED: &str = "No title";

/// One retrieved web result or direct page fetch.
///
/// Identity is the `url`. Records are read-only once collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Source URL
    pub url: String,

    /// Page title (if provided by the search provider)
    pub title: Option<String>,

    /// Rendered markdown of the page
    pub markdown: Option<String>,

    /// Plain content or snippet
    pub content: Option<String>,
}

impl EvidenceRecord {
    /// Create a record with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            markdown: None,
            content: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the rendered markdown.
    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    /// Set the plain content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Body text: markdown first, then plain content, else empty.
    pub fn body(&self) -> &str {
        self.markdown
            .as_deref()
            .or(self.content.as_deref())
            .unwrap_or("")
    }

    /// Title, or the placeholder when absent.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Whether the URL is hosted on the professional network.
    pub fn is_network_hosted(&self, network_host: &str) -> bool {
        self.url
            .to_lowercase()
            .contains(&network_host.to_lowercase())
    }
}

/// Ranking bucket for evidence records. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrustTier {
    /// Professional-network individual or company profile.
    NetworkProfile = 0,

    /// Page on the company's own domain.
    CompanyDomain = 1,

    /// Anything else on the open web.
    OpenWeb = 2,
}

impl TrustTier {
    /// Compute the tier of a URL.
    ///
    /// Pure function of the URL, the company domain (if known) and the
    /// professional network host.
    pub fn of(url: &str, company_domain: Option<&str>, network_host: &str) -> Self {
        let url = url.to_lowercase();
        let host = network_host.to_lowercase();

        let individual = format!("{}/in/", host);
        let company = format!("{}/company/", host);
        if url.contains(&individual) || url.contains(&company) {
            return Self::NetworkProfile;
        }

        match company_domain {
            Some(domain) if !domain.is_empty() && url.contains(&domain.to_lowercase()) => {
                Self::CompanyDomain
            }
            _ => Self::OpenWeb,
        }
    }
}
