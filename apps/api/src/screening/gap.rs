//! Keyword-Gap Analyzer: exact-token overlap between requirement and document keywords.

use serde::{Deserialize, Serialize};

use crate::screening::keywords::KeywordSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub matched: KeywordSet,
    pub missing: KeywordSet,
    /// missing / requirement keywords; 0.0 when the requirement side is empty.
    pub gap_ratio: f32,
}

/// `matched = requirement ∩ document`, `missing = requirement − document`.
pub fn analyze(requirement: &KeywordSet, document: &KeywordSet) -> GapReport {
    let (matched, missing): (KeywordSet, KeywordSet) = requirement
        .iter()
        .cloned()
        .partition(|kw| document.contains(kw));

    let gap_ratio = if requirement.is_empty() {
        0.0
    } else {
        missing.len() as f32 / requirement.len() as f32
    };

    GapReport {
        matched,
        missing,
        gap_ratio,
    }
}
