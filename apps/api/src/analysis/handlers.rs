//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::analysis::{AnalysisRequest, ResumeAnalyzer};
use crate::errors::{AnalysisError, AppError};
use crate::extraction::ExtractedText;
use crate::matching::ComparisonResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub resume_text: Option<String>,
    pub job_desc: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form with a `resume` PDF file and a `job_desc` text field.
/// Returns matched and missing keywords with the match score.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ComparisonResult>, AppError> {
    let request = read_analysis_form(multipart).await?;
    let result = run_blocking(state.analyzer, move |analyzer| analyzer.analyze(&request)).await?;
    Ok(Json(result))
}

/// POST /api/v1/compare
///
/// Compares a résumé already in text form against a job description.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<ComparisonResult>, AppError> {
    let result = run_blocking(state.analyzer, move |analyzer| {
        analyzer.compare_texts(request.resume_text.as_deref(), request.job_desc.as_deref())
    })
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/extract
///
/// Returns the plain text of an uploaded `resume` PDF. Useful for checking
/// what the matcher actually sees.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractedText>, AppError> {
    let request = read_analysis_form(multipart).await?;
    let extracted = run_blocking(state.analyzer, move |analyzer| {
        analyzer.extract(request.resume.as_ref())
    })
    .await?;
    Ok(Json(extracted))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Collects the `resume` and `job_desc` fields; anything else is ignored.
async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut request = AnalysisRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or("<unnamed>").to_string();
                let data = field.bytes().await?;
                debug!(file_name = %file_name, size = data.len(), "Received resume upload");
                request.resume = Some(data);
            }
            "job_desc" => {
                request.job_description = Some(field.text().await?);
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    Ok(request)
}

/// Runs CPU-bound analysis off the async executor.
async fn run_blocking<T, F>(analyzer: std::sync::Arc<ResumeAnalyzer>, job: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&ResumeAnalyzer) -> Result<T, AnalysisError> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || job(&analyzer))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))?;
    Ok(outcome?)
}
