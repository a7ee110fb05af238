use serde::{Deserialize, Serialize};

use crate::models::non_blank;

/// Body of `POST /analyze_skills`.
/// Both fields are optional at the serde layer so a missing `resumeText` surfaces
/// as a validation error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default, alias = "resume_text")]
    pub resume_text: Option<String>,
    #[serde(default, alias = "job_description")]
    pub job_description: Option<String>,
}

impl AnalysisRequest {
    pub fn resume_text(&self) -> Option<&str> {
        non_blank(&self.resume_text)
    }

    pub fn job_description(&self) -> Option<&str> {
        non_blank(&self.job_description)
    }
}

/// Fit assessment exactly as the model phrased it: a bare number when it gave one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchScore {
    Number(f64),
    Text(String),
}

/// Structured extraction result. Best-effort: any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience: String,
    pub achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<MatchScore>,
    /// Full model output, set only when none of it could be mapped onto the fields above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// `{"status": "success", "analysis": ...}` envelope shared by the analysis endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub status: &'static str,
    pub analysis: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(analysis: T) -> Self {
        Self {
            status: "success",
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_snake_case_aliases() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"resume_text": "Rust dev", "job_description": " "}"#)
                .unwrap();
        assert_eq!(req.resume_text(), Some("Rust dev"));
        assert_eq!(req.job_description(), None);
    }

    #[test]
    fn test_request_tolerates_missing_and_null_fields() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"jobDescription": null}"#).unwrap();
        assert_eq!(req.resume_text(), None);
        assert_eq!(req.job_description(), None);
    }

    #[test]
    fn test_result_serializes_camel_case_and_omits_absent_optionals() {
        let result = AnalysisResult {
            technical_skills: vec!["Rust".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["technicalSkills"][0], "Rust");
        assert!(value.get("matchScore").is_none());
        assert!(value.get("rawResponse").is_none());
    }

    #[test]
    fn test_match_score_keeps_number_or_text() {
        let number: MatchScore = serde_json::from_str("82").unwrap();
        assert_eq!(number, MatchScore::Number(82.0));
        let text: MatchScore = serde_json::from_str(r#""strong fit""#).unwrap();
        assert_eq!(text, MatchScore::Text("strong fit".into()));
    }
}
