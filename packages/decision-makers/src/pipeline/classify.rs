//! Field classifier.
//!
//! Splits requested fields into executive/role fields (answered through
//! people search) and everything else, and maps role fields onto canonical
//! title tokens. All rules are data tables evaluated in order; every
//! function here is a pure function of one field's text.

use crate::types::field::{Field, FieldClass};

/// Keywords that mark a field as an executive/role field.
///
/// Matched as plain substrings, so "sector" counts as "cto".
const ROLE_KEYWORDS: &[&str] = &[
    "ceo", "cto", "cfo", "coo", "cmo", "cpo", "chief", "founder", "president", "director",
];

/// Words dropped from descriptions when building search terms.
const STOP_WORDS: &[&str] = &["this", "that", "what", "when", "where", "which"];

/// Maximum description words appended to a field's search terms.
const MAX_DESCRIPTION_TERMS: usize = 3;

/// One canonical-title rule: any keyword in name or description yields `title`.
struct TitleRule {
    keywords: &'static [&'static str],
    title: &'static str,
}

/// Canonical title rules in priority order. First match wins.
const TITLE_RULES: &[TitleRule] = &[
    TitleRule {
        keywords: &["ceo", "chief executive"],
        title: "CEO",
    },
    TitleRule {
        keywords: &["cto", "chief technology"],
        title: "CTO",
    },
    TitleRule {
        keywords: &["cfo", "chief financial"],
        title: "CFO",
    },
    TitleRule {
        keywords: &["coo", "chief operating"],
        title: "COO",
    },
    TitleRule {
        keywords: &["cmo", "chief marketing"],
        title: "CMO",
    },
    TitleRule {
        keywords: &["cpo", "chief product"],
        title: "CPO",
    },
    TitleRule {
        keywords: &["founder"],
        title: "founder",
    },
    TitleRule {
        keywords: &["president"],
        title: "president",
    },
];

fn mentions(name: &str, description: &str, keyword: &str) -> bool {
    name.contains(keyword) || description.contains(keyword)
}

/// Classify a field as executive or other.
pub fn classify(field: &Field) -> FieldClass {
    let (name, description) = field.lowered();

    let is_role = ROLE_KEYWORDS
        .iter()
        .any(|k| mentions(&name, &description, k));

    if is_role {
        FieldClass::Executive
    } else {
        FieldClass::Other
    }
}

/// Canonical title for a field, or the raw field name when no rule matches.
pub fn canonical_title(field: &Field) -> String {
    let (name, description) = field.lowered();

    TITLE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| mentions(&name, &description, k)))
        .map(|rule| rule.title.to_string())
        .unwrap_or_else(|| field.name.clone())
}

/// Search terms for a non-executive field.
///
/// The field name followed by up to three significant description words,
/// in their original order.
pub fn search_terms(field: &Field) -> String {
    let cleaned: String = field
        .description
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    let significant: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && !STOP_WORDS.contains(w))
        .take(MAX_DESCRIPTION_TERMS)
        .collect();

    if significant.is_empty() {
        field.name.clone()
    } else {
        format!("{} {}", field.name, significant.join(" "))
    }
}

/// Fields partitioned by class, each preserving input order.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedFields<'a> {
    pub executive: Vec<&'a Field>,
    pub other: Vec<&'a Field>,
}

impl<'a> ClassifiedFields<'a> {
    /// Partition `fields` by [`classify`].
    pub fn partition(fields: &'a [Field]) -> Self {
        let (executive, other): (Vec<&Field>, Vec<&Field>) = fields
            .iter()
            .partition(|f| classify(f) == FieldClass::Executive);
        Self { executive, other }
    }

    /// Whether any executive field was requested.
    pub fn needs_executive_evidence(&self) -> bool {
        !self.executive.is_empty()
    }

    /// Deduplicated, non-empty canonical titles in input order.
    pub fn canonical_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = Vec::new();
        for field in &self.executive {
            let title = canonical_title(field);
            if !title.trim().is_empty() && !titles.contains(&title) {
                titles.push(title);
            }
        }
        titles
    }
}
