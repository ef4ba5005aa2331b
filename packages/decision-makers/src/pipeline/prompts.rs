//! LLM instructions for decision-maker extraction.

/// Verification policy handed to the extraction engine with every request.
pub const VERIFICATION_INSTRUCTIONS: &str = r#"Identify the company's current decision makers from the evidence below.

PHASE 1 - ANCHOR AUTHORITY
The company's official professional-network page (anchorProfileUrl, when present) is the
authoritative source for the company's identity. Only accept people who are tied to THIS company,
not to a similarly named one.

PHASE 2 - CURRENT EMPLOYMENT
Prefer individual profile pages. A person qualifies only if their profile shows the role at this
company as CURRENT (no end date, not listed under past experience). Former holders of a role must
not be reported.

PHASE 3 - CROSS-REFERENCING
When sources disagree, apply this precedence:
1. Individual profile pages showing current employment
2. The company's official profile page
3. Pages on the company's own domain (about, team, leadership)
4. Recent news and other web mentions
Newer evidence outranks older evidence at the same level.

PHASE 4 - QUALITY BAR
Never speculate. Only return a value that is directly stated in the evidence. If a role cannot be
verified, leave the field empty rather than guessing. Names must be full names as written in the
source."#;

/// Render the field list as a bullet block for prompts.
pub fn format_field_list(fields: &[crate::types::field::Field]) -> String {
    fields
        .iter()
        .map(|f| {
            if f.description.trim().is_empty() {
                format!("- {}", f.name)
            } else {
                format!("- {}: {}", f.name, f.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
