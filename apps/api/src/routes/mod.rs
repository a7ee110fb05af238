pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_skills;
use crate::errors::AppError;
use crate::intake::handlers::handle_upload_resume;
use crate::learning::handlers::{handle_skill_gap_analysis, handle_weekly_learning_tasks};
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload_resume", post(handle_upload_resume))
        .route("/analyze_skills", post(handle_analyze_skills))
        .route("/skill_gap_analysis", post(handle_skill_gap_analysis))
        .route(
            "/weekly_learning_task_generator",
            post(handle_weekly_learning_tasks),
        )
        .fallback(not_found)
        .with_state(state)
}
