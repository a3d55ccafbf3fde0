//! Selector: conflict-aware, budgeted application of recommendations.
//!
//! Algorithm:
//! 1. Group recommendations by target section (groups in first-seen order)
//! 2. Sort each group by (priority desc, impact desc); the sort is stable, so ties keep
//!    their input order
//! 3. Walk each group with a per-section applied counter:
//!    budget → category allow-list → priority threshold → conflict → commit
//! 4. Sections never interact: conflicts are only checked within one section
//!
//! Every input recommendation lands in exactly one of applied / skipped / conflicts.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::Sections;
use crate::recommendations::{Priority, Recommendation};
use crate::selection::edit_log::EditLog;

pub const DEFAULT_MAX_CHANGES_PER_SECTION: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Options and results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    pub priority_threshold: Priority,
    /// Empty means every category is allowed.
    pub categories: Vec<String>,
    pub max_changes_per_section: usize,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            priority_threshold: Priority::Medium,
            categories: Vec::new(),
            max_changes_per_section: DEFAULT_MAX_CHANGES_PER_SECTION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    BudgetExhausted,
    CategoryFiltered,
    BelowThreshold,
    OriginalNotFound,
    UnknownSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skipped {
    pub recommendation: Recommendation,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub recommendation: Recommendation,
    /// Id of the already-committed recommendation whose span overlaps this one.
    pub conflicts_with: String,
}

/// Partition of the input pool plus the commit history that produced it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub applied: Vec<Recommendation>,
    pub skipped: Vec<Skipped>,
    pub conflicts: Vec<Conflict>,
    pub log: EditLog,
}

impl Selection {
    /// Section map with every applied edit committed.
    pub fn sections(&self) -> Sections {
        self.log.replay()
    }

    pub fn total(&self) -> usize {
        self.applied.len() + self.skipped.len() + self.conflicts.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Selection algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Two spans conflict when either contains the other.
pub fn spans_conflict(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Partitions `recommendations` against `sections`. The input map is left untouched; the
/// committed result is available through [`Selection::sections`].
pub fn select(
    recommendations: Vec<Recommendation>,
    sections: &Sections,
    options: &SelectionOptions,
) -> Selection {
    let total = recommendations.len();
    let mut log = EditLog::new(sections.clone());
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut conflicts = Vec::new();

    for (label, mut group) in group_by_section(recommendations, sections) {
        group.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.impact.cmp(&a.impact))
        });
        let target = sections.lookup(&label).map(|(name, _)| name);
        let mut applied_here = 0usize;

        for rec in group {
            let skip_reason = if applied_here >= options.max_changes_per_section {
                Some(SkipReason::BudgetExhausted)
            } else if !options.categories.is_empty() && !options.categories.contains(&rec.category)
            {
                Some(SkipReason::CategoryFiltered)
            } else if rec.priority < options.priority_threshold {
                Some(SkipReason::BelowThreshold)
            } else if rec.original.is_empty() {
                Some(SkipReason::OriginalNotFound)
            } else {
                None
            };
            if let Some(reason) = skip_reason {
                debug!(id = %rec.id, section = %label, ?reason, "recommendation skipped");
                skipped.push(Skipped {
                    recommendation: rec,
                    reason,
                });
                continue;
            }

            let Some(name) = target else {
                debug!(id = %rec.id, section = %label, "recommendation targets unknown section");
                skipped.push(Skipped {
                    recommendation: rec,
                    reason: SkipReason::UnknownSection,
                });
                continue;
            };

            let collision = log
                .committed_in(name)
                .find(|edit| spans_conflict(&edit.original, &rec.original))
                .map(|edit| edit.recommendation_id.clone());
            if let Some(conflicts_with) = collision {
                debug!(id = %rec.id, section = %label, %conflicts_with, "recommendation conflicts");
                conflicts.push(Conflict {
                    recommendation: rec,
                    conflicts_with,
                });
                continue;
            }

            if log.commit(&rec.id, name, &rec.original, &rec.suggested) {
                debug!(id = %rec.id, section = %label, "recommendation applied");
                applied_here += 1;
                applied.push(rec);
            } else {
                debug!(id = %rec.id, section = %label, "original text no longer present");
                skipped.push(Skipped {
                    recommendation: rec,
                    reason: SkipReason::OriginalNotFound,
                });
            }
        }
    }

    info!(
        total,
        applied = applied.len(),
        skipped = skipped.len(),
        conflicts = conflicts.len(),
        "selection complete"
    );

    Selection {
        applied,
        skipped,
        conflicts,
        log,
    }
}

/// Groups by target section, in order of first appearance. Labels that resolve to a
/// present section are grouped under its canonical name, so `"experience"` and
/// `"Experience"` share one budget; anything else is grouped by its raw label.
fn group_by_section(
    recommendations: Vec<Recommendation>,
    sections: &Sections,
) -> Vec<(String, Vec<Recommendation>)> {
    let mut groups: Vec<(String, Vec<Recommendation>)> = Vec::new();
    for rec in recommendations {
        let key = sections
            .lookup(&rec.section)
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| rec.section.clone());
        match groups.iter_mut().find(|(label, _)| *label == key) {
            Some((_, group)) => group.push(rec),
            None => groups.push((key, vec![rec])),
        }
    }
    groups
}
