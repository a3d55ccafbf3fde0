//! Format pass: document-level formatting issues.
//!
//! These target the pseudo-section `"formatting"`, which no segmented document has, so
//! they are surfaced for review but never committed by the selector.

use crate::document::Sections;
use crate::recommendations::payload::AnalysisSignals;
use crate::recommendations::{Priority, Recommendation, RecommendationPass, RecommendationType};

pub const FORMATTING_SECTION: &str = "formatting";

pub struct FormatPass;

impl RecommendationPass for FormatPass {
    fn name(&self) -> &'static str {
        "format"
    }

    fn run(&self, _sections: &Sections, signals: &AnalysisSignals) -> Vec<Recommendation> {
        let Some(issues) = signals.format_issues() else {
            return Vec::new();
        };
        issues
            .iter()
            .enumerate()
            .map(|(i, issue)| {
                let label = issue.priority.as_deref().unwrap_or_default();
                let priority = Priority::parse(label);
                Recommendation {
                    id: format!("format-{i}"),
                    section: FORMATTING_SECTION.to_string(),
                    kind: RecommendationType::Formatting,
                    priority: priority.unwrap_or_default(),
                    original: issue.issue.clone(),
                    suggested: issue.recommendation.clone(),
                    reasoning: issue.issue.clone(),
                    impact: impact_for(priority),
                    category: "formatting".to_string(),
                }
            })
            .collect()
    }
}

/// high → 7, medium → 5, low → 3, anything else → 4.
fn impact_for(priority: Option<Priority>) -> u8 {
    match priority {
        Some(Priority::High) => 7,
        Some(Priority::Medium) => 5,
        Some(Priority::Low) => 3,
        None => 4,
    }
}
