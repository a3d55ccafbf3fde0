// Recommendation Generator: independent heuristic passes over the section map.
// Each pass sits behind `RecommendationPass`; no cross-pass deduplication happens here,
// overlapping proposals are resolved by the selector.

pub mod content_rewrite;
pub mod format;
pub mod keyword_gap;
pub mod payload;
pub mod quantification;
pub mod text;
pub mod weak_verbs;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::Sections;
use crate::recommendations::payload::AnalysisSignals;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Kind of edit a recommendation proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationType {
    Keyword,
    ActionVerb,
    Quantification,
    Formatting,
    ProfessionalLanguage,
}

/// Ordinal priority. Declaration order gives `Low < Medium < High`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Priority> {
        match value.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// An atomic proposed replacement inside one section.
///
/// At creation `original` is a literal substring of the target section. Earlier commits
/// may make it stale; the selector treats that as a skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub section: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub priority: Priority,
    pub original: String,
    pub suggested: String,
    pub reasoning: String,
    /// 1 – 10
    pub impact: u8,
    pub category: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pass strategy
// ────────────────────────────────────────────────────────────────────────────

/// One heuristic generator pass. A pass whose input signal is absent returns nothing.
pub trait RecommendationPass {
    fn name(&self) -> &'static str;

    fn run(&self, sections: &Sections, signals: &AnalysisSignals) -> Vec<Recommendation>;
}

/// The passes run by [`generate`], in order.
pub fn default_passes() -> Vec<Box<dyn RecommendationPass>> {
    vec![
        Box::new(keyword_gap::KeywordGapPass),
        Box::new(content_rewrite::ContentRewritePass),
        Box::new(format::FormatPass),
        Box::new(weak_verbs::WeakVerbPass),
        Box::new(quantification::QuantificationPass),
    ]
}

/// Runs every default pass and concatenates their output.
pub fn generate(sections: &Sections, signals: &AnalysisSignals) -> Vec<Recommendation> {
    generate_with(&default_passes(), sections, signals)
}

pub fn generate_with(
    passes: &[Box<dyn RecommendationPass>],
    sections: &Sections,
    signals: &AnalysisSignals,
) -> Vec<Recommendation> {
    let mut pool = Vec::new();
    for pass in passes {
        let produced = pass.run(sections, signals);
        debug!(pass = pass.name(), count = produced.len(), "generator pass complete");
        pool.extend(produced);
    }
    info!(
        sections = sections.len(),
        recommendations = pool.len(),
        "recommendation pool generated"
    );
    pool
}
