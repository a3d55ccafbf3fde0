//! Edit log: the ordered list of committed edits over a base section map.
//!
//! The selector never mutates sections directly: every commit is an `Edit` appended
//! here, and the current document is the log replayed over the base snapshot.

use serde::{Deserialize, Serialize};

use crate::document::{SectionName, Sections};

/// One committed replacement inside one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub recommendation_id: String,
    pub section: SectionName,
    pub original: String,
    pub suggested: String,
    /// Section content immediately before the commit.
    pub before: String,
    /// Section content immediately after the commit.
    pub after: String,
}

#[derive(Debug, Clone, Default)]
pub struct EditLog {
    base: Sections,
    edits: Vec<Edit>,
}

impl EditLog {
    pub fn new(base: Sections) -> Self {
        Self {
            base,
            edits: Vec::new(),
        }
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn into_edits(self) -> Vec<Edit> {
        self.edits
    }

    /// Edits already committed to `section`, in commit order.
    pub fn committed_in(&self, section: SectionName) -> impl Iterator<Item = &Edit> {
        self.edits.iter().filter(move |e| e.section == section)
    }

    /// Current content of `section`: the latest `after` for it, else the base content.
    pub fn current(&self, section: SectionName) -> Option<&str> {
        self.edits
            .iter()
            .rev()
            .find(|e| e.section == section)
            .map(|e| e.after.as_str())
            .or_else(|| self.base.get(section))
    }

    /// Commits `original → suggested` on the first literal occurrence in the section's
    /// current content. Returns `false` (and records nothing) when the section is absent
    /// or `original` no longer occurs in it.
    pub fn commit(
        &mut self,
        recommendation_id: &str,
        section: SectionName,
        original: &str,
        suggested: &str,
    ) -> bool {
        if original.is_empty() {
            return false;
        }
        let Some(before) = self.current(section) else {
            return false;
        };
        if !before.contains(original) {
            return false;
        }
        let after = before.replacen(original, suggested, 1);
        let edit = Edit {
            recommendation_id: recommendation_id.to_string(),
            section,
            original: original.to_string(),
            suggested: suggested.to_string(),
            before: before.to_string(),
            after,
        };
        self.edits.push(edit);
        true
    }

    /// Replays the first `count` edits over the base, giving the document as it was after
    /// that many commits. `snapshot(0)` is the base.
    pub fn snapshot(&self, count: usize) -> Sections {
        self.edits
            .iter()
            .take(count)
            .fold(self.base.clone(), |mut sections, edit| {
                sections.set(edit.section, edit.after.clone());
                sections
            })
    }

    /// The document with every committed edit applied.
    pub fn replay(&self) -> Sections {
        self.snapshot(self.edits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Sections {
        let mut sections = Sections::new();
        sections.push(
            SectionName::Experience,
            "Managed the project. Managed the budget.".to_string(),
        );
        sections.push(SectionName::Skills, "Rust".to_string());
        sections
    }

    #[test]
    fn test_commit_replaces_first_occurrence_only() {
        let mut log = EditLog::new(base());
        assert!(log.commit("r1", SectionName::Experience, "Managed", "Directed"));
        assert_eq!(
            log.current(SectionName::Experience),
            Some("Directed the project. Managed the budget.")
        );
        assert_eq!(log.edits()[0].before, "Managed the project. Managed the budget.");
    }

    #[test]
    fn test_commit_missing_original_records_nothing() {
        let mut log = EditLog::new(base());
        assert!(!log.commit("r1", SectionName::Experience, "Led", "Spearheaded"));
        assert!(!log.commit("r2", SectionName::Projects, "Rust", "Go"));
        assert!(!log.commit("r3", SectionName::Skills, "", "Go"));
        assert!(log.edits().is_empty());
    }

    #[test]
    fn test_snapshots_replay_in_order() {
        let mut log = EditLog::new(base());
        log.commit("r1", SectionName::Experience, "the project", "the platform launch");
        log.commit("r2", SectionName::Skills, "Rust", "Rust, Go");
        log.commit("r3", SectionName::Experience, "the budget", "a $2M budget");

        assert_eq!(log.snapshot(0), base());
        let after_one = log.snapshot(1);
        assert_eq!(
            after_one.get(SectionName::Experience),
            Some("Managed the platform launch. Managed the budget.")
        );
        assert_eq!(after_one.get(SectionName::Skills), Some("Rust"));

        let final_sections = log.replay();
        assert_eq!(
            final_sections.get(SectionName::Experience),
            Some("Managed the platform launch. Managed a $2M budget.")
        );
        assert_eq!(final_sections.get(SectionName::Skills), Some("Rust, Go"));
        assert_eq!(log.committed_in(SectionName::Experience).count(), 2);
    }
}
