//! Analysis payload ingestion.
//!
//! The external analysis service sends a loosely shaped JSON object. It is decoded once,
//! field by field and item by item, into `AnalysisSignals`: a list of tagged variants,
//! one per generator input. A malformed field or item is dropped with a warning; the rest
//! of the payload still feeds its passes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::recommendations::Priority;

// ────────────────────────────────────────────────────────────────────────────
// Wire shapes (camelCase, as sent by the analysis service)
// ────────────────────────────────────────────────────────────────────────────

/// `contentOptimizations[]` item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOptimization {
    pub section: String,
    pub current: String,
    pub improved: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// `improvements[]` item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub section: String,
    pub suggestion: String,
    #[serde(default)]
    pub current_text: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub impact: Option<i64>,
}

/// `formatOptimizations[]` item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptimization {
    pub issue: String,
    pub recommendation: String,
    #[serde(default)]
    pub priority: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated signals
// ────────────────────────────────────────────────────────────────────────────

/// A rewrite proposal normalized from either payload shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteItem {
    pub section: String,
    pub current: String,
    pub improved: String,
    pub reasoning: String,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub impact: Option<u8>,
}

/// A formatting issue. `priority` keeps the raw label; unknown labels are meaningful to
/// the format pass (they map to a distinct impact).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatIssue {
    pub issue: String,
    pub recommendation: String,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Signal {
    MissingKeywords(Vec<String>),
    Rewrites(Vec<RewriteItem>),
    FormatIssues(Vec<FormatIssue>),
}

/// Everything the analysis service told us, validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisSignals {
    signals: Vec<Signal>,
}

impl AnalysisSignals {
    /// Decodes a raw payload. Never fails: anything unusable is dropped.
    pub fn from_value(payload: &Value) -> Self {
        let mut signals = Vec::new();
        let Some(object) = payload.as_object() else {
            if !payload.is_null() {
                warn!("analysis payload is not an object, ignoring it");
            }
            return Self { signals };
        };

        if let Some(raw) = object.get("missingKeywords") {
            let keywords: Vec<String> = decode_items::<String>("missingKeywords", raw)
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            if !keywords.is_empty() {
                signals.push(Signal::MissingKeywords(keywords));
            }
        }

        let mut rewrites = Vec::new();
        if let Some(raw) = object.get("contentOptimizations") {
            rewrites.extend(
                decode_items::<ContentOptimization>("contentOptimizations", raw)
                    .into_iter()
                    .filter(|item| !item.current.is_empty())
                    .map(RewriteItem::from),
            );
        }
        if let Some(raw) = object.get("improvements") {
            rewrites.extend(
                decode_items::<Improvement>("improvements", raw)
                    .into_iter()
                    .filter_map(RewriteItem::from_improvement),
            );
        }
        if !rewrites.is_empty() {
            signals.push(Signal::Rewrites(rewrites));
        }

        if let Some(raw) = object.get("formatOptimizations") {
            let issues: Vec<FormatIssue> =
                decode_items::<FormatOptimization>("formatOptimizations", raw)
                    .into_iter()
                    .map(|item| FormatIssue {
                        issue: item.issue,
                        recommendation: item.recommendation,
                        priority: item.priority,
                    })
                    .collect();
            if !issues.is_empty() {
                signals.push(Signal::FormatIssues(issues));
            }
        }

        Self { signals }
    }

    pub fn missing_keywords(&self) -> Option<&[String]> {
        self.signals.iter().find_map(|s| match s {
            Signal::MissingKeywords(keywords) => Some(keywords.as_slice()),
            _ => None,
        })
    }

    pub fn rewrites(&self) -> Option<&[RewriteItem]> {
        self.signals.iter().find_map(|s| match s {
            Signal::Rewrites(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    pub fn format_issues(&self) -> Option<&[FormatIssue]> {
        self.signals.iter().find_map(|s| match s {
            Signal::FormatIssues(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl From<ContentOptimization> for RewriteItem {
    fn from(item: ContentOptimization) -> Self {
        RewriteItem {
            section: item.section,
            current: item.current,
            improved: item.improved,
            reasoning: item.reasoning,
            category: item.category.filter(|c| !c.trim().is_empty()),
            priority: None,
            impact: None,
        }
    }
}

impl RewriteItem {
    /// Improvements without `currentText` name no text to replace and are dropped.
    fn from_improvement(item: Improvement) -> Option<Self> {
        let current = item.current_text.filter(|t| !t.is_empty())?;
        Some(RewriteItem {
            section: item.section,
            current,
            improved: item.suggestion,
            reasoning: item.reason.unwrap_or_default(),
            category: None,
            priority: item.priority.as_deref().and_then(Priority::parse),
            impact: item.impact.map(|i| i.clamp(1, 10) as u8),
        })
    }
}

/// Decodes a JSON array item by item, dropping (and logging) items that don't fit `T`.
fn decode_items<T: DeserializeOwned>(field: &str, raw: &Value) -> Vec<T> {
    let Some(items) = raw.as_array() else {
        if !raw.is_null() {
            warn!(field, "analysis payload field is not an array, ignoring it");
        }
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(field, index, error = %e, "dropping malformed analysis item");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_payload_yields_no_signals() {
        assert!(AnalysisSignals::from_value(&Value::Null).is_empty());
        assert!(AnalysisSignals::from_value(&json!("nonsense")).is_empty());
        assert!(AnalysisSignals::from_value(&json!({})).is_empty());
    }

    #[test]
    fn test_missing_keywords_trimmed_and_filtered() {
        let signals = AnalysisSignals::from_value(&json!({
            "missingKeywords": [" Rust ", "", 42, "Kafka"]
        }));
        assert_eq!(
            signals.missing_keywords(),
            Some(&["Rust".to_string(), "Kafka".to_string()][..])
        );
    }

    #[test]
    fn test_malformed_field_does_not_poison_others() {
        let signals = AnalysisSignals::from_value(&json!({
            "missingKeywords": "not-a-list",
            "formatOptimizations": [
                {"issue": "Two fonts", "recommendation": "Use one font", "priority": "high"},
                {"issue": "missing recommendation"}
            ]
        }));
        assert!(signals.missing_keywords().is_none());
        let issues = signals.format_issues().expect("format issues survive");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].priority.as_deref(), Some("high"));
    }

    #[test]
    fn test_both_rewrite_shapes_are_normalized() {
        let signals = AnalysisSignals::from_value(&json!({
            "contentOptimizations": [{
                "section": "experience",
                "current": "Did stuff",
                "improved": "Delivered features",
                "reasoning": "Important to be specific",
                "category": "clarity"
            }],
            "improvements": [
                {"section": "Summary", "suggestion": "Senior engineer", "currentText": "Engineer",
                 "reason": "minor", "priority": "LOW", "impact": 42},
                {"section": "Summary", "suggestion": "No anchor text"}
            ]
        }));
        let rewrites = signals.rewrites().expect("rewrites present");
        assert_eq!(rewrites.len(), 2, "improvement without currentText is dropped");
        assert_eq!(rewrites[0].category.as_deref(), Some("clarity"));
        assert_eq!(rewrites[0].priority, None);
        assert_eq!(rewrites[1].current, "Engineer");
        assert_eq!(rewrites[1].priority, Some(Priority::Low));
        assert_eq!(rewrites[1].impact, Some(10), "impact is clamped to 10");
    }
}
