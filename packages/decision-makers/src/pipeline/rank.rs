//! Evidence ranker and merger.
//!
//! Orders evidence by trust tier, removes duplicate URLs, moves
//! network-hosted records to the front, caps the set, and renders it as the
//! text block the extraction engine reads.

use std::collections::HashSet;

use crate::types::evidence::{EvidenceRecord, TrustTier};

/// Separator placed between serialized evidence blocks.
pub const EVIDENCE_SEPARATOR: &str = "\n\n---\n\n";

/// Ranking policy inputs.
#[derive(Debug, Clone, Copy)]
pub struct RankPolicy<'a> {
    /// Company domain, for the company-domain tier.
    pub company_domain: Option<&'a str>,

    /// Professional network host.
    pub network_host: &'a str,

    /// Maximum records kept.
    pub max_evidence: usize,
}

impl<'a> RankPolicy<'a> {
    fn tier(&self, record: &EvidenceRecord) -> TrustTier {
        TrustTier::of(&record.url, self.company_domain, self.network_host)
    }
}

/// Rank, deduplicate and cap evidence records.
///
/// 1. Stable sort by [`TrustTier`]; equal tiers keep input order.
/// 2. Keep the first occurrence of each URL.
/// 3. Stable partition: network-hosted records first.
/// 4. Truncate to `max_evidence`.
pub fn rank_evidence(records: Vec<EvidenceRecord>, policy: &RankPolicy<'_>) -> Vec<EvidenceRecord> {
    let mut ranked = records;
    ranked.sort_by_key(|r| policy.tier(r));

    let mut seen: HashSet<String> = HashSet::with_capacity(ranked.len());
    ranked.retain(|r| seen.insert(r.url.clone()));

    let (mut merged, rest): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .partition(|r| r.is_network_hosted(policy.network_host));
    merged.extend(rest);
    merged.truncate(policy.max_evidence);

    tracing::debug!(
        kept = merged.len(),
        unique = seen.len(),
        "Ranked evidence"
    );

    merged
}

/// Serialize ranked records into one evidence document.
pub fn format_evidence(records: &[EvidenceRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "Source: {}\nTitle: {}\nContent:\n{}",
                r.url,
                r.display_title(),
                r.body()
            )
        })
        .collect::<Vec<_>>()
        .join(EVIDENCE_SEPARATOR)
}
