//! Axum route handlers for the Screening API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRequest, AnalysisResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub count: usize,
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub backend: String,
    pub result: AnalysisResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub local: AnalysisResult,
    pub remote: AnalysisResult,
    /// remote score minus local score
    pub score_delta: i16,
    pub labels_agree: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills
///
/// Lists the active vocabulary in display order.
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    let skills: Vec<String> = state.engine.vocabulary().terms().map(str::to_string).collect();
    Json(SkillsResponse {
        count: skills.len(),
        skills,
    })
}

/// POST /api/v1/analyze
///
/// Screens one resume against one job description with the configured backend.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    validate_request(&request, state.config.max_input_chars)?;

    let result = state.analyzer.analyze(&request).await?;
    let analysis_id = Uuid::new_v4();

    info!(
        %analysis_id,
        backend = state.analyzer.backend(),
        score = result.score,
        label = %result.label,
        "Analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        analysis_id,
        analyzed_at: Utc::now(),
        backend: state.analyzer.backend().to_string(),
        result,
    }))
}

/// POST /api/v1/analyze/compare
///
/// Runs the local engine and the external provider on the same input so the
/// provider's verdict can be checked against the heuristic one.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    validate_request(&request, state.config.max_input_chars)?;

    let provider = state.provider.as_ref().ok_or_else(|| {
        AppError::NotConfigured("No analysis provider configured (set PROVIDER_URL)".to_string())
    })?;

    let local = state
        .engine
        .analyze(&request.job_description, &request.resume_text)
        .with_metadata(&request);
    let remote = provider.analyze(&request).await?;

    let score_delta = i16::from(remote.score) - i16::from(local.score);
    let labels_agree = remote.label == local.label;

    info!(
        local_score = local.score,
        remote_score = remote.score,
        score_delta,
        labels_agree,
        "Comparison complete"
    );

    Ok(Json(CompareResponse {
        local,
        remote,
        score_delta,
        labels_agree,
    }))
}

fn validate_request(request: &AnalysisRequest, max_chars: usize) -> Result<(), AppError> {
    for (field, text) in [
        ("jobDescription", &request.job_description),
        ("resumeText", &request.resume_text),
    ] {
        if text.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
        if text.chars().count() > max_chars {
            return Err(AppError::Validation(format!(
                "{field} exceeds the {max_chars} character limit"
            )));
        }
    }
    Ok(())
}
