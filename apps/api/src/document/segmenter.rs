//! Segmenter: splits raw document content into the ordered section map.
//!
//! Plain text is scanned line by line; markup is handled by `document::markup`, which
//! walks the parsed tree. Both paths ask a `SectionDetector` whether a piece of text is a
//! section header, so header heuristics can be swapped without touching either scanner.

use tracing::debug;

use crate::document::markup::MarkupDocument;
use crate::document::{DocumentFormat, SectionName, Sections, HEADER_ALIASES};

/// Plain-text header lines must be shorter than this (in characters).
pub const PLAIN_HEADER_MAX_LEN: usize = 50;
/// Markup header nodes must be shorter than this (in characters).
pub const MARKUP_HEADER_MAX_LEN: usize = 100;
/// Upper bound for the all-caps "looks like a heading" test.
const HEADING_LIKE_MAX_LEN: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Detection strategy
// ────────────────────────────────────────────────────────────────────────────

/// Decides which pieces of text open a new section.
pub trait SectionDetector {
    /// Returns the canonical section that `text` introduces, if it reads as a section
    /// header no longer than `max_len` characters.
    fn detect_header(&self, text: &str, max_len: usize) -> Option<SectionName>;

    /// True when `text` looks like a heading even though it names no known section.
    fn is_heading_like(&self, text: &str) -> bool;
}

/// Default detector: keyword containment against `HEADER_ALIASES` plus a length cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordHeaderDetector;

impl SectionDetector for KeywordHeaderDetector {
    fn detect_header(&self, text: &str, max_len: usize) -> Option<SectionName> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.chars().count() >= max_len {
            return None;
        }
        let lower = trimmed.to_lowercase();
        HEADER_ALIASES
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, name)| *name)
    }

    fn is_heading_like(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.chars().count() >= HEADING_LIKE_MAX_LEN {
            return false;
        }
        trimmed.chars().any(|c| c.is_alphabetic())
            && trimmed
                .chars()
                .all(|c| c == ' ' || (c.is_alphabetic() && c.is_uppercase()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Segments `content` with the default detector.
pub fn segment(content: &str, format: DocumentFormat) -> Sections {
    match format {
        DocumentFormat::Plain => segment_plain(content, &KeywordHeaderDetector),
        DocumentFormat::Markup => MarkupDocument::parse(content, &KeywordHeaderDetector)
            .sections()
            .clone(),
    }
}

/// Line-scanning segmentation.
///
/// Lines before the first header land in `General`; a document without any header is a
/// single `General` section. Section text is trimmed and empty sections are dropped.
pub fn segment_plain(content: &str, detector: &dyn SectionDetector) -> Sections {
    let mut sections = Sections::new();
    let mut current = SectionName::General;
    let mut buffer: Vec<&str> = Vec::new();

    for line in content.lines() {
        match detector.detect_header(line, PLAIN_HEADER_MAX_LEN) {
            Some(next) => {
                flush(&mut sections, current, &mut buffer);
                debug!(header = line.trim(), section = %next, "section header");
                current = next;
            }
            None => buffer.push(line),
        }
    }
    flush(&mut sections, current, &mut buffer);

    sections
}

fn flush(sections: &mut Sections, name: SectionName, buffer: &mut Vec<&str>) {
    let joined = buffer.join("\n");
    let text = joined.trim();
    if !text.is_empty() {
        sections.push(name, text.to_string());
    }
    buffer.clear();
}
