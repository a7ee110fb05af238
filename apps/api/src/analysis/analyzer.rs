//! Skill Analyzer: validate, prompt, one bounded inference call, parse.

use std::time::Duration;

use tracing::info;

use crate::analysis::parser::parse_analysis;
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::llm_client::{generate_bounded, GenerationOptions, InferenceBackend};
use crate::models::analysis::{AnalysisRequest, AnalysisResult};

pub const ANALYSIS_OPTIONS: GenerationOptions = GenerationOptions::new(0.3, 800);

/// Runs the analysis for one request.
///
/// Validation happens before the backend is touched: a blank `resumeText`
/// never produces an outbound call. Upstream failures and timeouts are
/// returned as errors; unparseable output is not an error.
pub async fn analyze_skills(
    backend: &dyn InferenceBackend,
    request: &AnalysisRequest,
    limit: Duration,
) -> Result<AnalysisResult, AppError> {
    let resume_text = request
        .resume_text()
        .ok_or_else(|| AppError::Validation("resumeText is required".to_string()))?;
    let job_description = request.job_description();

    let prompt = build_analysis_prompt(resume_text, job_description);
    info!(
        "Analyzing resume ({} bytes, job description: {}) with {}",
        resume_text.len(),
        job_description.is_some(),
        backend.model()
    );

    let reply = generate_bounded(backend, &prompt, ANALYSIS_OPTIONS, limit).await?;
    Ok(parse_analysis(&reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{FakeBackend, Reply};

    const LIMIT: Duration = Duration::from_secs(30);

    fn request(resume: Option<&str>, jd: Option<&str>) -> AnalysisRequest {
        AnalysisRequest {
            resume_text: resume.map(String::from),
            job_description: jd.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_blank_resume_is_rejected_without_calling_backend() {
        let backend = FakeBackend::text("Technical Skills: Rust");
        for resume in [None, Some(""), Some("   \n")] {
            let err = analyze_skills(&backend, &request(resume, None), LIMIT)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_job_description_reaches_prompt() {
        let backend = FakeBackend::text("Technical Skills: Python\nMatch Score: 90");
        let result = analyze_skills(
            &backend,
            &request(Some("Jane Doe, Python"), Some("Python developer")),
            LIMIT,
        )
        .await
        .unwrap();

        assert_eq!(backend.calls(), 1);
        let prompt = &backend.prompts()[0];
        assert!(prompt.contains("Jane Doe, Python"));
        assert!(prompt.contains("Python developer"));
        assert_eq!(
            result.match_score,
            Some(crate::models::analysis::MatchScore::Number(90.0))
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_is_an_error() {
        let backend = FakeBackend::replying(vec![Reply::Fail(500)]);
        let err = analyze_skills(&backend, &request(Some("Jane"), None), LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_empty_reply_is_an_empty_result() {
        let backend = FakeBackend::text("");
        let result = analyze_skills(&backend, &request(Some("Jane"), None), LIMIT)
            .await
            .unwrap();
        assert_eq!(result, AnalysisResult::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_backend_times_out() {
        let backend = FakeBackend::replying(vec![Reply::Hang]);
        let err = analyze_skills(&backend, &request(Some("Jane"), None), LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UpstreamTimeout(_)));
    }
}
