// Document model: canonical section taxonomy, the ordered section map, segmentation,
// markup tree binding, and reconstruction back to a single string.

pub mod markup;
pub mod reconstruct;
pub mod segmenter;

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Section taxonomy
// ────────────────────────────────────────────────────────────────────────────

/// Closed set of canonical section names a document is segmented into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionName {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Achievements,
    Certifications,
    Languages,
    General,
}

/// Header keywords in match order, each mapped to its canonical section.
/// The first keyword contained in a candidate header wins.
pub const HEADER_ALIASES: &[(&str, SectionName)] = &[
    ("summary", SectionName::Summary),
    ("objective", SectionName::Summary),
    ("profile", SectionName::Summary),
    ("experience", SectionName::Experience),
    ("work history", SectionName::Experience),
    ("employment", SectionName::Experience),
    ("education", SectionName::Education),
    ("skills", SectionName::Skills),
    ("projects", SectionName::Projects),
    ("achievements", SectionName::Achievements),
    ("certifications", SectionName::Certifications),
    ("languages", SectionName::Languages),
];

impl SectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Summary => "Summary",
            SectionName::Experience => "Experience",
            SectionName::Education => "Education",
            SectionName::Skills => "Skills",
            SectionName::Projects => "Projects",
            SectionName::Achievements => "Achievements",
            SectionName::Certifications => "Certifications",
            SectionName::Languages => "Languages",
            SectionName::General => "General",
        }
    }

    /// Resolves a free-form label (`"Experience"`, `"work experience"`, `"general"`)
    /// to a canonical section. Returns `None` for labels outside the taxonomy.
    pub fn resolve(label: &str) -> Option<SectionName> {
        let lower = label.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if lower == "general" {
            return Some(SectionName::General);
        }
        HEADER_ALIASES
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input format of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[default]
    Plain,
    Markup,
}

// ────────────────────────────────────────────────────────────────────────────
// Ordered section map
// ────────────────────────────────────────────────────────────────────────────

/// One named content region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: SectionName,
    pub content: String,
}

/// Section map in first-seen order. Sections are never split or merged after
/// segmentation; only their content changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sections {
    entries: Vec<Section>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds content under `name`. A repeated section appends to the existing entry
    /// (blank-line separated) and keeps its original position.
    pub fn push(&mut self, name: SectionName, content: String) {
        match self.entries.iter_mut().find(|s| s.name == name) {
            Some(existing) => {
                existing.content.push_str("\n\n");
                existing.content.push_str(&content);
            }
            None => self.entries.push(Section { name, content }),
        }
    }

    pub fn get(&self, name: SectionName) -> Option<&str> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.content.as_str())
    }

    /// Replaces the content of an existing section. Unknown sections are a no-op;
    /// returns whether anything was written.
    pub fn set(&mut self, name: SectionName, content: String) -> bool {
        match self.entries.iter_mut().find(|s| s.name == name) {
            Some(section) => {
                section.content = content;
                true
            }
            None => false,
        }
    }

    /// Looks a section up by a free-form label, see [`SectionName::resolve`].
    pub fn lookup(&self, label: &str) -> Option<(SectionName, &str)> {
        let name = SectionName::resolve(label)?;
        self.get(name).map(|content| (name, content))
    }

    pub fn names(&self) -> Vec<SectionName> {
        self.entries.iter().map(|s| s.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
