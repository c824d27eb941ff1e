//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::analysis::interpreter::interpret;
use crate::analysis::prompts::instruction_for;
use crate::analysis::{AnalysisResponse, Mode};
use crate::errors::AppError;
use crate::rasterizer::rasterize_pdf;
use crate::state::AppState;

/// Response shape toggle: `json` (default) returns the interpreted
/// analysis; `report` streams the raw reply as a downloadable text file.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Json,
    Report,
}

/// POST /api/v1/analyses
///
/// Multipart form: `mode` (one of the five analysis modes),
/// `job_description` (non-empty text), `resume` (PDF file; first page only
/// is used). Runs the full pipeline — rasterize → dispatch → interpret —
/// as one blocking sequence per user action.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut mode: Option<Mode> = None;
    let mut job_description: Option<String> = None;
    let mut resume: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "mode" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable mode field: {e}")))?;
                mode = Some(Mode::parse(value.trim()).ok_or_else(|| {
                    AppError::Validation(format!("unknown analysis mode '{value}'"))
                })?);
            }
            "job_description" => {
                job_description = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("unreadable job_description field: {e}"))
                })?);
            }
            "resume" => {
                resume = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("unreadable resume field: {e}"))
                })?);
            }
            _ => {} // unknown fields are ignored
        }
    }

    let mode = mode.ok_or_else(|| AppError::Validation("mode is required".to_string()))?;

    let job_description = job_description
        .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let resume = resume.ok_or_else(|| AppError::Validation("resume PDF is required".to_string()))?;

    let document = rasterize_pdf(resume).await?;

    let raw_text = state
        .dispatcher
        .dispatch(instruction_for(mode), &document, &job_description)
        .await?;

    let analysis = interpret(mode, raw_text, &job_description);

    Ok(match params.format {
        ReportFormat::Json => Json(analysis).into_response(),
        ReportFormat::Report => report_response(analysis),
    })
}

/// The downloadable report: the raw model reply, byte-for-byte, served as a
/// plain-text attachment named after the selected mode.
fn report_response(analysis: AnalysisResponse) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", analysis.report_filename),
            ),
        ],
        analysis.raw_text,
    )
        .into_response()
}
