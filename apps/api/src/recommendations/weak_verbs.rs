//! Weak-verb pass: swaps weak action verbs for stronger synonyms.
//!
//! The n-th occurrence of a verb within a section gets synonym `n mod len`, so repeated
//! verbs don't all collapse to the same replacement.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Sections;
use crate::recommendations::payload::AnalysisSignals;
use crate::recommendations::text::{context_window, match_capitalization};
use crate::recommendations::{Priority, Recommendation, RecommendationPass, RecommendationType};

/// Characters of context kept on each side of a matched verb.
const WINDOW_RADIUS: usize = 30;

const WEAK_VERBS: &[(&str, &[&str])] = &[
    ("managed", &["orchestrated", "directed", "oversaw"]),
    ("helped", &["facilitated", "enabled", "supported"]),
    ("worked", &["collaborated", "partnered", "operated"]),
    ("created", &["engineered", "designed", "established"]),
    ("improved", &["optimized", "enhanced", "elevated"]),
    ("led", &["spearheaded", "directed", "championed"]),
];

static WEAK_VERB_PATTERNS: LazyLock<Vec<(&'static str, Regex, &'static [&'static str])>> =
    LazyLock::new(|| {
        WEAK_VERBS
            .iter()
            .map(|(verb, synonyms)| {
                let re = Regex::new(&format!(r"(?i)\b{verb}\b")).expect("valid regex");
                (*verb, re, *synonyms)
            })
            .collect()
    });

pub struct WeakVerbPass;

impl RecommendationPass for WeakVerbPass {
    fn name(&self) -> &'static str {
        "weak-verb"
    }

    fn run(&self, sections: &Sections, _signals: &AnalysisSignals) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        for section in sections.iter() {
            let content = section.content.as_str();
            for (verb, re, synonyms) in WEAK_VERB_PATTERNS.iter() {
                for (n, m) in re.find_iter(content).enumerate() {
                    let synonym = match_capitalization(m.as_str(), synonyms[n % synonyms.len()]);
                    let (lo, hi) = context_window(content, m.start(), m.end(), WINDOW_RADIUS);
                    let suggested = format!(
                        "{}{}{}",
                        &content[lo..m.start()],
                        synonym,
                        &content[m.end()..hi]
                    );
                    recs.push(Recommendation {
                        id: format!("verb-{}", recs.len()),
                        section: section.name.to_string(),
                        kind: RecommendationType::ActionVerb,
                        priority: Priority::Medium,
                        original: content[lo..hi].to_string(),
                        suggested,
                        reasoning: format!(
                            "'{verb}' is a weak action verb; '{}' shows stronger ownership",
                            synonym.to_lowercase()
                        ),
                        impact: 5,
                        category: "action-verbs".to_string(),
                    });
                }
            }
        }
        recs
    }
}
