//! Markup documents: tree-based segmentation and in-place reconstruction.
//!
//! The parsed `scraper` tree is kept for the whole run. Each section remembers the
//! pre-order indices of the text nodes it captured, so committed edits are written back
//! into those nodes and the tree is re-serialized. No string splicing over raw markup.

use scraper::{Html, Node};
use tracing::debug;

use crate::document::segmenter::{SectionDetector, MARKUP_HEADER_MAX_LEN};
use crate::document::{SectionName, Sections};
use crate::selection::edit_log::Edit;

/// Elements whose text never belongs to a section.
const IGNORED_PARENTS: &[&str] = &["script", "style", "title", "head", "noscript"];

/// A captured text node: its pre-order index in the tree and its current raw text.
#[derive(Debug, Clone)]
struct TextSlot {
    ordinal: usize,
    text: String,
}

#[derive(Debug, Clone)]
struct SectionBinding {
    name: SectionName,
    slots: Vec<TextSlot>,
}

impl SectionBinding {
    fn content(&self) -> String {
        self.slots
            .iter()
            .map(|slot| slot.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replaces the changed span of `original` inside the single slot that holds it.
    /// Returns false when `original` is absent or the changed span crosses slots.
    fn splice(&mut self, original: &str, suggested: &str) -> bool {
        let Some(start) = self.content().find(original) else {
            return false;
        };
        let (prefix, original_end, suggested_end) = changed_span(original, suggested);
        let span_start = start + prefix;
        let span_end = start + original_end;
        let replacement = &suggested[prefix..suggested_end];

        let mut cursor = 0;
        for slot in &mut self.slots {
            let trimmed_len = slot.text.trim().len();
            if trimmed_len == 0 {
                continue;
            }
            if span_start >= cursor && span_end <= cursor + trimmed_len {
                let lead = slot.text.len() - slot.text.trim_start().len();
                let local = lead + span_start - cursor;
                slot.text.replace_range(local..local + (span_end - span_start), replacement);
                return true;
            }
            cursor += trimmed_len + 1;
        }
        false
    }
}

/// Byte bounds of the differing middle of two strings: the common prefix length, and
/// where the common suffix starts in `original` and in `suggested`.
fn changed_span(original: &str, suggested: &str) -> (usize, usize, usize) {
    let prefix: usize = original
        .chars()
        .zip(suggested.chars())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a.len_utf8())
        .sum();
    let suffix: usize = original[prefix..]
        .chars()
        .rev()
        .zip(suggested[prefix..].chars().rev())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a.len_utf8())
        .sum();
    (prefix, original.len() - suffix, suggested.len() - suffix)
}

/// Parsed markup plus the text-node bindings of every section.
pub struct MarkupDocument {
    html: Html,
    bindings: Vec<SectionBinding>,
    sections: Sections,
}

impl MarkupDocument {
    /// Parses `content` and segments it by walking the tree depth-first.
    ///
    /// An element whose own text names a section (and is under the markup length cap)
    /// starts capturing at its depth. Capturing stops at the next element at the same or
    /// a shallower depth whose own text is another section header or an all-caps heading.
    /// Text seen while not capturing goes to `General`.
    pub fn parse(content: &str, detector: &dyn SectionDetector) -> Self {
        let html = Html::parse_document(content);
        let mut bindings: Vec<SectionBinding> = Vec::new();
        let mut capture: Option<(SectionName, usize)> = None;
        let mut header = None;

        for (ordinal, node) in html.tree.root().descendants().enumerate() {
            let depth = node.ancestors().count();
            match node.value() {
                Node::Element(element) => {
                    if IGNORED_PARENTS.contains(&element.name()) {
                        continue;
                    }
                    let own_text = node
                        .children()
                        .filter_map(|child| child.value().as_text())
                        .map(|text| {
                            let raw: &str = &text.text;
                            raw.trim()
                        })
                        .filter(|text| !text.is_empty())
                        .collect::<Vec<_>>()
                        .join(" ");
                    if own_text.is_empty() {
                        continue;
                    }

                    let detected = detector.detect_header(&own_text, MARKUP_HEADER_MAX_LEN);
                    if let Some((_, start_depth)) = capture {
                        if depth <= start_depth
                            && (detected.is_some() || detector.is_heading_like(&own_text))
                        {
                            capture = None;
                        }
                    }
                    if capture.is_none() {
                        if let Some(name) = detected {
                            debug!(header = %own_text, section = %name, depth, "markup section header");
                            capture = Some((name, depth));
                            header = Some(node.id());
                        }
                    }
                }
                Node::Text(text) => {
                    let parent = node.parent();
                    let ignored = parent
                        .and_then(|p| p.value().as_element())
                        .is_some_and(|el| IGNORED_PARENTS.contains(&el.name()));
                    let is_header_text = header.is_some() && parent.map(|p| p.id()) == header;
                    let raw: &str = &text.text;
                    if ignored || is_header_text || raw.trim().is_empty() {
                        continue;
                    }

                    let name = capture.map(|(name, _)| name).unwrap_or(SectionName::General);
                    let slot = TextSlot {
                        ordinal,
                        text: raw.to_string(),
                    };
                    match bindings.iter_mut().find(|b| b.name == name) {
                        Some(binding) => binding.slots.push(slot),
                        None => bindings.push(SectionBinding {
                            name,
                            slots: vec![slot],
                        }),
                    }
                }
                _ => {}
            }
        }

        let mut sections = Sections::new();
        for binding in &bindings {
            let content = binding.content();
            if !content.is_empty() {
                sections.push(binding.name, content);
            }
        }

        Self {
            html,
            bindings,
            sections,
        }
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// Writes committed edits back into the captured text nodes, in commit order.
    ///
    /// Each edit is narrowed to the span where `original` and `suggested` actually differ,
    /// located at the first occurrence of `original` in the section text, and spliced into
    /// the node holding that span. Only a changed span that crosses node boundaries
    /// collapses the section: its full post-edit text goes into the first captured node
    /// and the rest are blanked.
    pub fn apply_edits(&mut self, edits: &[Edit]) {
        for edit in edits {
            let Some(binding) = self.bindings.iter_mut().find(|b| b.name == edit.section) else {
                continue;
            };
            if !binding.splice(&edit.original, &edit.suggested) {
                debug!(
                    recommendation_id = %edit.recommendation_id,
                    section = %edit.section,
                    "edit spans text nodes, collapsing section"
                );
                for (i, slot) in binding.slots.iter_mut().enumerate() {
                    slot.text = if i == 0 {
                        edit.after.clone()
                    } else {
                        String::new()
                    };
                }
            }
            self.sections.set(edit.section, binding.content());
        }

        let ids: Vec<_> = self.html.tree.root().descendants().map(|n| n.id()).collect();
        for binding in &self.bindings {
            for slot in &binding.slots {
                let Some(id) = ids.get(slot.ordinal) else {
                    continue;
                };
                if let Some(mut node) = self.html.tree.get_mut(*id) {
                    if let Node::Text(text) = node.value() {
                        text.text = slot.text.as_str().into();
                    }
                }
            }
        }
    }

    /// Serializes the (possibly edited) tree back to HTML.
    pub fn render(&self) -> String {
        self.html.html()
    }
}
