//! Axum route handlers for the Learning Planner API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::learning::planner::{extract_skills, generate_weekly_tasks, plan_skill_gap};
use crate::models::analysis::SuccessResponse;
use crate::models::learning::{LearningPlan, LearningTaskRequest, SkillGapRequest};
use crate::state::AppState;

/// POST /skill_gap_analysis
///
/// Extracts skills from the resume, compares them with the target role and
/// builds weekly study tasks for whatever is missing.
pub async fn handle_skill_gap_analysis(
    State(state): State<AppState>,
    payload: Result<Json<SkillGapRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<LearningPlan>>, AppError> {
    let Json(request) = payload?;
    let resume_text = request
        .resume_text()
        .ok_or_else(|| AppError::Validation("resumeText is required".to_string()))?;
    let target_role = request
        .target_role()
        .ok_or_else(|| AppError::Validation("targetRole is required".to_string()))?;

    let plan = plan_skill_gap(
        state.llm.as_ref(),
        resume_text,
        target_role,
        state.config.inference_timeout,
    )
    .await?;
    Ok(Json(SuccessResponse::new(plan)))
}

/// POST /weekly_learning_task_generator
///
/// With `missingSkills`, generates tasks for them. Otherwise extracts the resume's
/// skills and returns them with no tasks.
pub async fn handle_weekly_learning_tasks(
    State(state): State<AppState>,
    payload: Result<Json<LearningTaskRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<LearningPlan>>, AppError> {
    let Json(request) = payload?;
    let missing_skills = request.missing_skills();
    let limit = state.config.inference_timeout;

    if !missing_skills.is_empty() {
        let weekly_tasks = generate_weekly_tasks(state.llm.as_ref(), &missing_skills, limit).await?;
        return Ok(Json(SuccessResponse::new(LearningPlan {
            extracted_skills: vec![],
            missing_skills,
            weekly_tasks,
        })));
    }

    let resume_text = request.resume_text().ok_or_else(|| {
        AppError::Validation(
            "Either resumeText or missingSkills must be provided".to_string(),
        )
    })?;
    let extracted_skills = extract_skills(state.llm.as_ref(), resume_text, limit).await;

    Ok(Json(SuccessResponse::new(LearningPlan {
        extracted_skills,
        ..Default::default()
    })))
}
