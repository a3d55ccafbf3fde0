//! Reconstructor: turns the section map back into a document and the applied set into
//! an audit summary.

use serde::{Deserialize, Serialize};

use crate::document::{SectionName, Sections};
use crate::recommendations::Recommendation;

/// One line of the audit trail shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub section: String,
    pub original: String,
    pub improved: String,
    pub reasoning: String,
    pub category: String,
}

/// Plain-text serialization: each section as an upper-cased header line followed by its
/// content, blank-line separated, in section order. `General` holds the text that had no
/// header, so it is written bare and segments back into `General`.
pub fn reconstruct(sections: &Sections) -> String {
    sections
        .iter()
        .map(|section| match section.name {
            SectionName::General => section.content.clone(),
            name => format!("{}\n{}", name.as_str().to_uppercase(), section.content),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn summarize(applied: &[Recommendation]) -> Vec<ChangeSummary> {
    applied
        .iter()
        .map(|rec| ChangeSummary {
            section: rec.section.clone(),
            original: rec.original.clone(),
            improved: rec.suggested.clone(),
            reasoning: rec.reasoning.clone(),
            category: rec.category.clone(),
        })
        .collect()
}

/// Renders the audit summary as Markdown, grouped by section in first-seen order.
pub fn format_change_summary(summary: &[ChangeSummary]) -> String {
    if summary.is_empty() {
        return "# Changes\n\nNo changes applied.\n".to_string();
    }

    let mut md = format!("# Changes ({})\n\n", summary.len());
    let mut sections: Vec<&str> = Vec::new();
    for change in summary {
        if !sections.contains(&change.section.as_str()) {
            sections.push(&change.section);
        }
    }
    for section in sections {
        md.push_str(&format!("## {section}\n\n"));
        for change in summary.iter().filter(|c| c.section == section) {
            md.push_str(&format!("- **{}**\n", change.category));
            md.push_str(&format!("  - Before: {}\n", change.original));
            md.push_str(&format!("  - After: {}\n", change.improved));
            if !change.reasoning.is_empty() {
                md.push_str(&format!("  - Why: {}\n", change.reasoning));
            }
        }
        md.push('\n');
    }
    md
}
