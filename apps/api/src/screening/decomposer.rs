//! Requirement Decomposer: turns free-text requirement input into ordered requirement units.

use serde::{Deserialize, Serialize};

/// Section titles used by the upload form, in screening order.
pub const JOB_DUTIES: &str = "Job Duties";
pub const CORE_SKILLS: &str = "Core Skills";
pub const SECONDARY_SKILLS: &str = "Secondary Skills";
pub const JOB_DESCRIPTION: &str = "Job Description";

/// How a section's text becomes requirement units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMode {
    /// One requirement per non-blank line.
    #[default]
    PerLine,
    /// The whole trimmed text is a single requirement.
    WholeDescription,
}

/// A titled block of requirement text supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementSection {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub mode: SectionMode,
}

impl RequirementSection {
    pub fn per_line(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            mode: SectionMode::PerLine,
        }
    }

    pub fn whole(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            mode: SectionMode::WholeDescription,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One atomic requirement. `index` is global across all sections of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementUnit {
    pub index: usize,
    pub section: String,
    pub text: String,
}

/// Splits raw text on line boundaries, trims each line and drops blank ones.
/// Order is preserved and duplicates are kept.
pub fn decompose(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Decomposes every section in order, numbering units across sections.
pub fn decompose_sections(sections: &[RequirementSection]) -> Vec<RequirementUnit> {
    let mut units = Vec::new();

    for section in sections {
        let texts = match section.mode {
            SectionMode::PerLine => decompose(&section.text),
            SectionMode::WholeDescription => {
                let trimmed = section.text.trim();
                if trimmed.is_empty() {
                    vec![]
                } else {
                    vec![trimmed.to_string()]
                }
            }
        };

        for text in texts {
            units.push(RequirementUnit {
                index: units.len(),
                section: section.title.clone(),
                text,
            });
        }
    }

    units
}
