//! Keyword-gap pass: weaves missing keywords into existing sentences.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Sections;
use crate::recommendations::payload::AnalysisSignals;
use crate::recommendations::text::split_sentences;
use crate::recommendations::{Priority, Recommendation, RecommendationPass, RecommendationType};

/// Only the first N missing keywords are used.
const MAX_KEYWORDS: usize = 8;
const MIN_SENTENCE_LEN: usize = 20;
const MAX_SENTENCE_LEN: usize = 200;

static USING_WITH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(using|with)\s+").expect("valid regex"));
static DEVELOPED_CREATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(developed|created)\s+").expect("valid regex"));

pub struct KeywordGapPass;

impl RecommendationPass for KeywordGapPass {
    fn name(&self) -> &'static str {
        "keyword-gap"
    }

    /// Keyword *i* targets the *i mod n*-th section (round-robin in document order).
    fn run(&self, sections: &Sections, signals: &AnalysisSignals) -> Vec<Recommendation> {
        let Some(keywords) = signals.missing_keywords() else {
            return Vec::new();
        };
        let names = sections.names();
        if names.is_empty() {
            return Vec::new();
        }

        keywords
            .iter()
            .take(MAX_KEYWORDS)
            .enumerate()
            .filter_map(|(i, keyword)| {
                let name = names[i % names.len()];
                let content = sections.get(name)?;
                let sentence = pick_sentence(content)?;
                Some(Recommendation {
                    id: format!("keyword-{i}"),
                    section: name.to_string(),
                    kind: RecommendationType::Keyword,
                    priority: Priority::High,
                    original: sentence.to_string(),
                    suggested: insert_keyword(sentence, keyword),
                    reasoning: format!(
                        "'{keyword}' is expected for this role but missing from the document"
                    ),
                    impact: 8,
                    category: "keyword-integration".to_string(),
                })
            })
            .collect()
    }
}

/// First sentence of 20–200 characters, falling back to the first sentence.
fn pick_sentence(content: &str) -> Option<&str> {
    let sentences = split_sentences(content);
    sentences
        .iter()
        .find(|s| (MIN_SENTENCE_LEN..=MAX_SENTENCE_LEN).contains(&s.chars().count()))
        .or_else(|| sentences.first())
        .copied()
}

/// Insertion heuristic:
/// - "using"/"with" → keyword goes right after that word, joined with "and"
/// - "developed"/"created" → the following word gets a "{keyword}-powered" prefix
/// - otherwise → ", leveraging {keyword}" is appended
pub fn insert_keyword(sentence: &str, keyword: &str) -> String {
    if let Some(m) = USING_WITH_RE.find(sentence) {
        return format!("{}{keyword} and {}", &sentence[..m.end()], &sentence[m.end()..]);
    }
    if let Some(m) = DEVELOPED_CREATED_RE.find(sentence) {
        return format!("{}{keyword}-powered {}", &sentence[..m.end()], &sentence[m.end()..]);
    }
    format!("{sentence}, leveraging {keyword}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SectionName;
    use serde_json::json;

    fn sections() -> Sections {
        let mut sections = Sections::new();
        sections.push(
            SectionName::Summary,
            "Hi. Backend engineer building payment systems with Java.".to_string(),
        );
        sections.push(
            SectionName::Experience,
            "Developed dashboards for the finance team.".to_string(),
        );
        sections
    }

    #[test]
    fn test_insert_after_using_or_with() {
        assert_eq!(
            insert_keyword("Built services using Python", "Docker"),
            "Built services using Docker and Python"
        );
        assert_eq!(
            insert_keyword("Shipped tooling With Go", "gRPC"),
            "Shipped tooling With gRPC and Go"
        );
    }

    #[test]
    fn test_prefix_after_developed_or_created() {
        assert_eq!(
            insert_keyword("Developed dashboards for finance", "React"),
            "Developed React-powered dashboards for finance"
        );
    }

    #[test]
    fn test_append_fallback() {
        assert_eq!(
            insert_keyword("Owned the billing roadmap", "Kafka"),
            "Owned the billing roadmap, leveraging Kafka"
        );
    }

    #[test]
    fn test_whole_word_match_only() {
        // "without" must not be treated as "with"
        assert_eq!(
            insert_keyword("Shipped without regressions", "CI"),
            "Shipped without regressions, leveraging CI"
        );
    }

    #[test]
    fn test_sentence_selection_prefers_length_window() {
        assert_eq!(
            pick_sentence("Hi. Backend engineer building payment systems with Java."),
            Some("Backend engineer building payment systems with Java")
        );
        assert_eq!(pick_sentence("Short. Tiny."), Some("Short"));
        assert_eq!(pick_sentence("   "), None);
    }

    #[test]
    fn test_round_robin_over_sections() {
        let signals = AnalysisSignals::from_value(&json!({
            "missingKeywords": ["Kubernetes", "React", "Terraform"]
        }));
        let recs = KeywordGapPass.run(&sections(), &signals);

        let targets: Vec<_> = recs.iter().map(|r| r.section.as_str()).collect();
        assert_eq!(targets, vec!["Summary", "Experience", "Summary"]);
        assert_eq!(
            recs[1].suggested,
            "Developed React-powered dashboards for the finance team"
        );
        assert!(recs.iter().all(|r| r.priority == Priority::High && r.impact == 8));
        assert!(recs.iter().all(|r| r.category == "keyword-integration"));
    }

    #[test]
    fn test_keywords_capped_at_eight() {
        let keywords: Vec<String> = (0..12).map(|i| format!("kw{i}")).collect();
        let signals = AnalysisSignals::from_value(&json!({ "missingKeywords": keywords }));
        assert_eq!(KeywordGapPass.run(&sections(), &signals).len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_no_keywords_no_recommendations() {
        assert!(KeywordGapPass
            .run(&sections(), &AnalysisSignals::default())
            .is_empty());
    }
}
