//! Document Processor: one document, one run.
//!
//! Flow: segment → generate → select → reconstruct.
//!
//! The processor owns the section map (and, for markup, the parsed tree). It is fully
//! synchronous and holds no shared state, so independent documents can be processed in
//! parallel by independent processors.

use serde::Serialize;
use tracing::{debug, info};

use crate::document::markup::MarkupDocument;
use crate::document::reconstruct::{format_change_summary, reconstruct, summarize, ChangeSummary};
use crate::document::segmenter::{segment_plain, KeywordHeaderDetector, SectionDetector};
use crate::document::{DocumentFormat, Sections};
use crate::recommendations::payload::AnalysisSignals;
use crate::recommendations::{generate, Recommendation};
use crate::selection::edit_log::Edit;
use crate::selection::selector::{select, Conflict, Selection, SelectionOptions, Skipped};

pub struct DocumentProcessor {
    format: DocumentFormat,
    sections: Sections,
    markup: Option<MarkupDocument>,
}

/// Everything one optimization run produces.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub document: String,
    pub recommendations: usize,
    pub applied: Vec<Recommendation>,
    pub skipped: Vec<Skipped>,
    pub conflicts: Vec<Conflict>,
    pub edits: Vec<Edit>,
    pub summary: Vec<ChangeSummary>,
    pub summary_markdown: String,
}

impl DocumentProcessor {
    pub fn new(content: &str, format: DocumentFormat) -> Self {
        Self::with_detector(content, format, &KeywordHeaderDetector)
    }

    pub fn with_detector(
        content: &str,
        format: DocumentFormat,
        detector: &dyn SectionDetector,
    ) -> Self {
        let (sections, markup) = match format {
            DocumentFormat::Plain => (segment_plain(content, detector), None),
            DocumentFormat::Markup => {
                let doc = MarkupDocument::parse(content, detector);
                (doc.sections().clone(), Some(doc))
            }
        };
        info!(?format, sections = sections.len(), "document segmented");
        Self {
            format,
            sections,
            markup,
        }
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn generate(&self, signals: &AnalysisSignals) -> Vec<Recommendation> {
        if signals.is_empty() {
            debug!("no analysis signals, running document-only passes");
        }
        generate(&self.sections, signals)
    }

    /// Selects and commits recommendations, then swaps the section map for the committed
    /// snapshot. Markup trees receive the same edits.
    pub fn apply(
        &mut self,
        recommendations: Vec<Recommendation>,
        options: &SelectionOptions,
    ) -> Selection {
        let selection = select(recommendations, &self.sections, options);
        self.sections = selection.sections();
        if let Some(markup) = self.markup.as_mut() {
            markup.apply_edits(selection.log.edits());
        }
        selection
    }

    pub fn reconstruct(&self) -> String {
        match (&self.format, &self.markup) {
            (DocumentFormat::Markup, Some(markup)) => markup.render(),
            _ => reconstruct(&self.sections),
        }
    }

    /// Runs the whole pipeline on the current section map.
    pub fn optimize(
        &mut self,
        signals: &AnalysisSignals,
        options: &SelectionOptions,
    ) -> OptimizationReport {
        let pool = self.generate(signals);
        let recommendations = pool.len();
        let selection = self.apply(pool, options);
        debug_assert_eq!(selection.total(), recommendations);
        let document = self.reconstruct();

        let summary = summarize(&selection.applied);
        let summary_markdown = format_change_summary(&summary);
        info!(
            recommendations,
            applied = selection.applied.len(),
            "document optimized"
        );

        OptimizationReport {
            document,
            recommendations,
            applied: selection.applied,
            skipped: selection.skipped,
            conflicts: selection.conflicts,
            edits: selection.log.into_edits(),
            summary,
            summary_markdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SectionName;
    use crate::recommendations::Priority;
    use serde_json::json;

    const PLAIN: &str = "SUMMARY\nBackend engineer who helped ship payment systems.\n\n\
        EXPERIENCE\nManaged the rollout successfully.\nCreated dashboards for finance.";

    #[test]
    fn test_plain_pipeline_end_to_end() {
        let mut processor = DocumentProcessor::new(PLAIN, DocumentFormat::Plain);
        let report = processor.optimize(&AnalysisSignals::default(), &SelectionOptions::default());

        assert!(report.recommendations > 0);
        assert!(!report.applied.is_empty());
        assert_eq!(
            report.applied.len() + report.skipped.len() + report.conflicts.len(),
            report.recommendations
        );
        assert_eq!(report.edits.len(), report.applied.len());
        assert_eq!(report.summary.len(), report.applied.len());
        assert!(report.document.starts_with("SUMMARY\n"));
        assert!(report.document.contains("\n\nEXPERIENCE\n"));
        // The quantification rewrite (high, impact 9) wins over the weak-verb window.
        assert!(report.document.contains("Managed a team of 5+ the rollout successfully"));
        assert_eq!(processor.reconstruct(), report.document);
    }

    #[test]
    fn test_apply_replaces_section_map() {
        let mut processor = DocumentProcessor::new(PLAIN, DocumentFormat::Plain);
        let before = processor.sections().clone();
        let pool = processor.generate(&AnalysisSignals::default());
        let selection = processor.apply(pool, &SelectionOptions::default());

        assert_eq!(processor.sections(), &selection.sections());
        assert_ne!(processor.sections(), &before);
        assert_eq!(selection.log.snapshot(0), before);
    }

    #[test]
    fn test_threshold_high_blocks_weak_verbs() {
        let mut processor = DocumentProcessor::new(PLAIN, DocumentFormat::Plain);
        let options = SelectionOptions {
            priority_threshold: Priority::High,
            ..SelectionOptions::default()
        };
        let report = processor.optimize(&AnalysisSignals::default(), &options);
        assert!(report.applied.iter().all(|r| r.priority == Priority::High));
    }

    #[test]
    fn test_markup_pipeline_edits_tree() {
        let html = "<html><body><h2>Experience</h2><ul><li>Managed the rollout successfully.</li>\
                    <li>Wrote the runbook.</li></ul></body></html>";
        let mut processor = DocumentProcessor::new(html, DocumentFormat::Markup);
        assert_eq!(
            processor.sections().get(SectionName::Experience),
            Some("Managed the rollout successfully.\nWrote the runbook.")
        );

        let report = processor.optimize(&AnalysisSignals::default(), &SelectionOptions::default());
        assert!(report
            .document
            .contains("<li>Managed a team of 5+ the rollout successfully.</li>"));
        assert!(report.document.contains("<h2>Experience</h2>"));
        assert!(report.document.contains("<li>Wrote the runbook.</li>"));
    }

    #[test]
    fn test_markup_short_bullets_stay_separate() {
        let html = "<h2>Experience</h2><ul><li>Helped the support team.</li>\
                    <li>Wrote the runbook.</li><li>Built the billing service.</li></ul>";
        let mut processor = DocumentProcessor::new(html, DocumentFormat::Markup);
        let report = processor.optimize(&AnalysisSignals::default(), &SelectionOptions::default());

        assert!(report.applied.iter().any(|r| r.id == "verb-0"));
        assert!(report.document.contains("<li>Facilitated the support team.</li>"));
        assert!(report.document.contains("<li>Wrote the runbook.</li>"));
        assert!(report.document.contains("<li>Built the billing service.</li>"));
        assert_eq!(
            processor.sections().get(SectionName::Experience),
            Some("Facilitated the support team.\nWrote the runbook.\nBuilt the billing service.")
        );
    }

    #[test]
    fn test_keyword_payload_is_applied() {
        let mut processor = DocumentProcessor::new(PLAIN, DocumentFormat::Plain);
        let signals = AnalysisSignals::from_value(&json!({"missingKeywords": ["Kafka"]}));
        let report = processor.optimize(&signals, &SelectionOptions::default());
        assert!(report.document.contains("Kafka"));
        assert!(report.applied.iter().any(|r| r.id == "keyword-0"));
    }
}
