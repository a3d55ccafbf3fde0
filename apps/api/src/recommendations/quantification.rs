//! Quantification pass: flags achievement claims that carry no number.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Sections;
use crate::recommendations::payload::AnalysisSignals;
use crate::recommendations::text::split_sentences;
use crate::recommendations::{Priority, Recommendation, RecommendationPass, RecommendationType};

static ACHIEVEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(improved|increased|reduced|saved|generated|achieved|delivered|completed|managed|led)\b",
    )
    .expect("valid regex")
});

/// Verb-specific rewrites, checked in order. `None` means "insert a team size after the
/// verb" rather than a suffix.
const SUBSTITUTIONS: &[(&str, Option<&str>)] = &[
    ("improved", Some(" by 25%")),
    ("increased", Some(" by 30%")),
    ("reduced", Some(" by 20%")),
    ("managed", None),
    ("led", None),
];

const TEAM_SIZE: &str = "a team of 5+";
const FALLBACK_SUFFIX: &str = " (quantify with specific metrics)";

pub struct QuantificationPass;

impl RecommendationPass for QuantificationPass {
    fn name(&self) -> &'static str {
        "quantification"
    }

    fn run(&self, sections: &Sections, _signals: &AnalysisSignals) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        for section in sections.iter() {
            for sentence in split_sentences(&section.content) {
                if !is_unquantified_claim(sentence) {
                    continue;
                }
                recs.push(Recommendation {
                    id: format!("quantify-{}", recs.len()),
                    section: section.name.to_string(),
                    kind: RecommendationType::Quantification,
                    priority: Priority::High,
                    original: sentence.to_string(),
                    suggested: quantify(sentence),
                    reasoning: "Achievement claim has no measurable outcome; numbers make impact credible"
                        .to_string(),
                    impact: 9,
                    category: "quantification".to_string(),
                });
            }
        }
        recs
    }
}

fn is_unquantified_claim(sentence: &str) -> bool {
    ACHIEVEMENT_RE.is_match(sentence) && !sentence.chars().any(|c| c.is_ascii_digit())
}

/// Applies the first matching substitution from `SUBSTITUTIONS`; sentences whose only
/// achievement verbs have no substitution get a reminder suffix.
pub fn quantify(sentence: &str) -> String {
    for (verb, suffix) in SUBSTITUTIONS {
        let Some(m) = ACHIEVEMENT_RE
            .find_iter(sentence)
            .find(|m| m.as_str().eq_ignore_ascii_case(verb))
        else {
            continue;
        };
        let (head, tail) = sentence.split_at(m.end());
        return match suffix {
            Some(suffix) => format!("{head}{suffix}{tail}"),
            None => format!("{head} {TEAM_SIZE}{tail}"),
        };
    }
    format!("{sentence}{FALLBACK_SUFFIX}")
}
