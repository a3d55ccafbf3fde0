//! Content-rewrite pass: maps analysis rewrites into recommendations.
//!
//! When the payload supplies no priority/impact they are inferred from the wording of
//! the reasoning text.

use crate::document::SectionName;
use crate::document::Sections;
use crate::recommendations::payload::{AnalysisSignals, RewriteItem};
use crate::recommendations::{Priority, Recommendation, RecommendationPass, RecommendationType};

const HIGH_PRIORITY_WORDS: &[&str] = &["critical", "essential", "important", "must", "required"];
const LOW_PRIORITY_WORDS: &[&str] = &["optional", "minor", "slight", "consider"];
const HIGH_IMPACT_WORDS: &[&str] = &["significantly", "greatly", "substantial", "major"];
const MEDIUM_IMPACT_WORDS: &[&str] = &["moderately", "improve", "enhance", "better"];

pub struct ContentRewritePass;

impl RecommendationPass for ContentRewritePass {
    fn name(&self) -> &'static str {
        "content-rewrite"
    }

    fn run(&self, _sections: &Sections, signals: &AnalysisSignals) -> Vec<Recommendation> {
        let Some(items) = signals.rewrites() else {
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| to_recommendation(i, item))
            .collect()
    }
}

fn to_recommendation(index: usize, item: &RewriteItem) -> Recommendation {
    // Canonical name when the label resolves; otherwise the label is kept and the
    // selector will treat the section as unknown.
    let section = SectionName::resolve(&item.section)
        .map(|name| name.to_string())
        .unwrap_or_else(|| item.section.clone());

    Recommendation {
        id: format!("rewrite-{index}"),
        section,
        kind: RecommendationType::ProfessionalLanguage,
        priority: item
            .priority
            .unwrap_or_else(|| priority_from_reasoning(&item.reasoning)),
        original: item.current.clone(),
        suggested: item.improved.clone(),
        reasoning: item.reasoning.clone(),
        impact: item
            .impact
            .unwrap_or_else(|| impact_from_reasoning(&item.reasoning)),
        category: item
            .category
            .clone()
            .unwrap_or_else(|| "professional-language".to_string()),
    }
}

pub fn priority_from_reasoning(reasoning: &str) -> Priority {
    let lower = reasoning.to_lowercase();
    if HIGH_PRIORITY_WORDS.iter().any(|w| lower.contains(w)) {
        Priority::High
    } else if LOW_PRIORITY_WORDS.iter().any(|w| lower.contains(w)) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

pub fn impact_from_reasoning(reasoning: &str) -> u8 {
    let lower = reasoning.to_lowercase();
    if HIGH_IMPACT_WORDS.iter().any(|w| lower.contains(w)) {
        8
    } else if MEDIUM_IMPACT_WORDS.iter().any(|w| lower.contains(w)) {
        6
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_keywords() {
        assert_eq!(
            priority_from_reasoning("This is CRITICAL for ATS parsing"),
            Priority::High
        );
        assert_eq!(
            priority_from_reasoning("Consider a slight rewording"),
            Priority::Low
        );
        assert_eq!(priority_from_reasoning("Reads awkwardly"), Priority::Medium);
        // high words win over low words
        assert_eq!(
            priority_from_reasoning("Optional but important"),
            Priority::High
        );
    }

    #[test]
    fn test_impact_keywords() {
        assert_eq!(impact_from_reasoning("Greatly improves clarity"), 8);
        assert_eq!(impact_from_reasoning("Makes it read better"), 6);
        assert_eq!(impact_from_reasoning("Tone"), 4);
    }

    #[test]
    fn test_maps_items_verbatim_with_inferred_fields() {
        let signals = AnalysisSignals::from_value(&json!({
            "contentOptimizations": [{
                "section": "work experience",
                "current": "Did stuff for clients",
                "improved": "Delivered integrations for 3 enterprise clients",
                "reasoning": "Essential: significantly clearer ownership"
            }]
        }));
        let recs = ContentRewritePass.run(&Sections::new(), &signals);

        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.section, "Experience");
        assert_eq!(rec.original, "Did stuff for clients");
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.impact, 8);
        assert_eq!(rec.category, "professional-language");
        assert_eq!(rec.kind, RecommendationType::ProfessionalLanguage);
    }

    #[test]
    fn test_supplied_priority_and_impact_win() {
        let signals = AnalysisSignals::from_value(&json!({
            "improvements": [{
                "section": "Custom Section",
                "suggestion": "Better text",
                "currentText": "Old text",
                "reason": "critical",
                "priority": "low",
                "impact": 3
            }]
        }));
        let recs = ContentRewritePass.run(&Sections::new(), &signals);
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].impact, 3);
        assert_eq!(recs[0].section, "Custom Section", "unknown labels are kept");
    }
}
