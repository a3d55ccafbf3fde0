//! Axum route handlers for the Document API.
//!
//! The engine is synchronous and CPU-bound, so every handler validates the request and
//! then runs a fresh `DocumentProcessor` inside `spawn_blocking`.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::document::segmenter::segment;
use crate::document::{DocumentFormat, Section, Sections};
use crate::errors::AppError;
use crate::optimizer::processor::{DocumentProcessor, OptimizationReport};
use crate::recommendations::payload::AnalysisSignals;
use crate::recommendations::{Priority, Recommendation};
use crate::selection::selector::SelectionOptions;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    pub content: String,
    #[serde(default)]
    pub format: DocumentFormat,
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub content: String,
    #[serde(default)]
    pub format: DocumentFormat,
    /// Raw analysis payload; decoded leniently, see `AnalysisSignals::from_value`.
    #[serde(default)]
    pub analysis: Value,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub sections: Vec<Section>,
    pub recommendations: Vec<Recommendation>,
}

/// Per-request overrides of the configured selection defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionOverrides {
    pub priority_threshold: Option<Priority>,
    pub categories: Option<Vec<String>>,
    pub max_changes_per_section: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub content: String,
    #[serde(default)]
    pub format: DocumentFormat,
    #[serde(default)]
    pub analysis: Value,
    #[serde(default)]
    pub options: Option<SelectionOverrides>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub run_id: Uuid,
    pub processed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: OptimizationReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/segment
///
/// Returns the section map the engine would work on, without generating anything.
pub async fn handle_segment(
    State(state): State<AppState>,
    Json(request): Json<SegmentRequest>,
) -> Result<Json<SegmentResponse>, AppError> {
    validate_content(&request.content, &state.config)?;

    let sections: Vec<Section> = run_blocking("segment", move || {
        let sections = segment(&request.content, request.format);
        ensure_sections(&sections)?;
        Ok(sections.iter().cloned().collect())
    })
    .await?;

    Ok(Json(SegmentResponse { sections }))
}

/// POST /api/v1/recommendations
///
/// Returns the full recommendation pool for display/approval, nothing applied.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    validate_content(&request.content, &state.config)?;

    let response = run_blocking("recommend", move || {
        let processor = DocumentProcessor::new(&request.content, request.format);
        ensure_sections(processor.sections())?;
        let signals = AnalysisSignals::from_value(&request.analysis);
        let recommendations = processor.generate(&signals);
        Ok(RecommendResponse {
            sections: processor.sections().iter().cloned().collect(),
            recommendations,
        })
    })
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/optimize
///
/// Full pipeline: segment → generate → select → reconstruct. Returns the edited
/// document, the partition, the edit log, and the audit summary.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    validate_content(&request.content, &state.config)?;
    let options = resolve_options(&state.config, request.options.unwrap_or_default())?;

    let run_id = Uuid::new_v4();
    info!(%run_id, format = ?request.format, bytes = request.content.len(), "optimization requested");

    let report = run_blocking("optimize", move || {
        let mut processor = DocumentProcessor::new(&request.content, request.format);
        ensure_sections(processor.sections())?;
        let signals = AnalysisSignals::from_value(&request.analysis);
        Ok(processor.optimize(&signals, &options))
    })
    .await?;

    info!(
        %run_id,
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        conflicts = report.conflicts.len(),
        "optimization complete"
    );

    Ok(Json(OptimizeResponse {
        run_id,
        processed_at: Utc::now(),
        report,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_content(content: &str, config: &Config) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    if content.len() > config.max_document_bytes {
        return Err(AppError::Validation(format!(
            "content exceeds {} bytes",
            config.max_document_bytes
        )));
    }
    Ok(())
}

fn resolve_options(
    config: &Config,
    overrides: SelectionOverrides,
) -> Result<SelectionOptions, AppError> {
    let defaults = config.selection_defaults();
    let options = SelectionOptions {
        priority_threshold: overrides
            .priority_threshold
            .unwrap_or(defaults.priority_threshold),
        categories: overrides.categories.unwrap_or(defaults.categories),
        max_changes_per_section: overrides
            .max_changes_per_section
            .unwrap_or(defaults.max_changes_per_section),
    };
    if options.max_changes_per_section == 0 {
        return Err(AppError::Validation(
            "max_changes_per_section must be at least 1".to_string(),
        ));
    }
    Ok(options)
}

fn ensure_sections(sections: &Sections) -> Result<(), AppError> {
    if sections.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "document contains no text to segment".to_string(),
        ));
    }
    Ok(())
}

/// Runs CPU-bound engine work off the async executor.
async fn run_blocking<T, F>(task: &'static str, work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {task}: {e}"))
    })?
}
