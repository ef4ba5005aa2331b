//! Discovery pipeline.
//!
//! Stages, in call order:
//! - Field classification and canonical titles
//! - Anchor profile resolution
//! - Tiered query synthesis
//! - Evidence collection (search + direct leadership pages)
//! - Ranking, dedup and evidence formatting
//! - Extraction dispatch

pub mod anchor;
pub mod classify;
pub mod collect;
pub mod dispatch;
pub mod planner;
pub mod prompts;
pub mod queries;
pub mod rank;

pub use anchor::{find_anchor_profile, select_anchor};
pub use classify::{canonical_title, classify, search_terms, ClassifiedFields};
pub use collect::{collect_evidence, fetch_leadership_page, LEADERSHIP_PAGE_TITLE};
pub use dispatch::dispatch_extraction;
pub use planner::{DecisionMakerPlanner, QueryPlan};
pub use prompts::{format_field_list, VERIFICATION_INSTRUCTIONS};
pub use queries::{anchor_company_name, QuerySynthesizer};
pub use rank::{format_evidence, rank_evidence, RankPolicy, EVIDENCE_SEPARATOR};
