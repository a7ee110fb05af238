use serde::{Deserialize, Serialize};

use crate::models::non_blank;

/// Body of `POST /skill_gap_analysis`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapRequest {
    #[serde(default, alias = "resume_text")]
    pub resume_text: Option<String>,
    #[serde(default, alias = "target_role")]
    pub target_role: Option<String>,
}

impl SkillGapRequest {
    pub fn resume_text(&self) -> Option<&str> {
        non_blank(&self.resume_text)
    }

    pub fn target_role(&self) -> Option<&str> {
        non_blank(&self.target_role)
    }
}

/// Body of `POST /weekly_learning_task_generator`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningTaskRequest {
    #[serde(default, alias = "resume_text")]
    pub resume_text: Option<String>,
    #[serde(default, alias = "missing_skills")]
    pub missing_skills: Option<Vec<String>>,
}

impl LearningTaskRequest {
    pub fn resume_text(&self) -> Option<&str> {
        non_blank(&self.resume_text)
    }

    /// Requested skills with blanks dropped.
    pub fn missing_skills(&self) -> Vec<String> {
        self.missing_skills
            .iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// A week-by-week study plan for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTasks {
    pub skill: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlan {
    pub extracted_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub weekly_tasks: Vec<WeeklyTasks>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_skills_drops_blanks() {
        let req: LearningTaskRequest =
            serde_json::from_str(r#"{"missingSkills": ["Kafka", " ", "Go "]}"#).unwrap();
        assert_eq!(req.missing_skills(), vec!["Kafka", "Go"]);
    }

    #[test]
    fn test_learning_plan_serializes_camel_case() {
        let plan = LearningPlan {
            missing_skills: vec!["Go".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["missingSkills"][0], "Go");
        assert!(value["weeklyTasks"].as_array().unwrap().is_empty());
    }
}
