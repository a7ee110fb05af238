//! Axum route handlers for the Skill Analysis API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::analysis::analyzer::analyze_skills;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRequest, AnalysisResult, SuccessResponse};
use crate::state::AppState;

/// POST /analyze_skills
///
/// Extracts technical skills, soft skills, experience and achievements from resume text,
/// plus a match score when a job description is supplied.
pub async fn handle_analyze_skills(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<AnalysisResult>>, AppError> {
    let Json(request) = payload?;
    let analysis = analyze_skills(
        state.llm.as_ref(),
        &request,
        state.config.inference_timeout,
    )
    .await?;
    Ok(Json(SuccessResponse::new(analysis)))
}
