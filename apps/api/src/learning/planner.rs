//! Learning Planner: skill extraction, gap analysis and weekly tasks.
//!
//! Each step is one bounded inference call with a JSON reply. Steps degrade the
//! same way the analysis parser does: an unparseable reply becomes an empty list,
//! and task generation falls back to a fixed study template.

use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::learning::prompts::{
    build_skill_extract_prompt, build_skill_gap_prompt, build_weekly_tasks_prompt,
};
use crate::llm_client::{
    generate_bounded, parse_json_reply, GenerationOptions, InferenceBackend, LlmError,
};
use crate::models::learning::{LearningPlan, WeeklyTasks};
use crate::models::push_unique;

pub const EXTRACT_OPTIONS: GenerationOptions = GenerationOptions::new(0.3, 600);
pub const GAP_OPTIONS: GenerationOptions = GenerationOptions::new(0.3, 600);
pub const TASK_OPTIONS: GenerationOptions = GenerationOptions::new(0.5, 1500);

/// Upper bound on tasks kept per skill.
pub const MAX_TASKS_PER_SKILL: usize = 7;

#[derive(Debug, Default, Deserialize)]
struct SkillsReply {
    #[serde(default)]
    skills: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MissingSkillsReply {
    #[serde(default, alias = "missingSkills")]
    missing_skills: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WeeklyTasksReply {
    #[serde(default, alias = "weeklyTasks")]
    weekly_tasks: Vec<WeeklyTasks>,
}

/// Extracts a flat skill list from resume text.
/// Any failure, upstream or parse, degrades to an empty list.
pub async fn extract_skills(
    backend: &dyn InferenceBackend,
    resume_text: &str,
    limit: Duration,
) -> Vec<String> {
    let prompt = build_skill_extract_prompt(resume_text);
    let reply = match generate_bounded(backend, &prompt, EXTRACT_OPTIONS, limit).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Skill extraction failed, continuing with no skills: {e}");
            return vec![];
        }
    };
    let parsed: SkillsReply = parse_json_reply(&reply).unwrap_or_else(|e| {
        warn!("Skill extraction reply was not JSON: {e}");
        SkillsReply::default()
    });
    dedup(parsed.skills)
}

/// Asks which skills the target role needs that `skills` lacks.
/// Upstream failures are errors; an unparseable reply means no gaps were found.
pub async fn find_missing_skills(
    backend: &dyn InferenceBackend,
    skills: &[String],
    target_role: &str,
    limit: Duration,
) -> Result<Vec<String>, AppError> {
    let prompt = build_skill_gap_prompt(skills, target_role);
    let reply = generate_bounded(backend, &prompt, GAP_OPTIONS, limit).await?;
    let parsed: MissingSkillsReply = parse_json_reply(&reply).unwrap_or_else(|e| {
        warn!("Skill gap reply was not JSON: {e}");
        MissingSkillsReply::default()
    });
    Ok(dedup(parsed.missing_skills))
}

/// Generates weekly tasks for `missing_skills`, filling in the template when the
/// reply has none. Upstream failures are returned to the caller.
pub async fn generate_weekly_tasks(
    backend: &dyn InferenceBackend,
    missing_skills: &[String],
    limit: Duration,
) -> Result<Vec<WeeklyTasks>, LlmError> {
    if missing_skills.is_empty() {
        return Ok(vec![]);
    }
    let prompt = build_weekly_tasks_prompt(missing_skills);
    let reply = generate_bounded(backend, &prompt, TASK_OPTIONS, limit).await?;
    Ok(tasks_or_template(&reply, missing_skills))
}

/// Full gap analysis for `POST /skill_gap_analysis`.
pub async fn plan_skill_gap(
    backend: &dyn InferenceBackend,
    resume_text: &str,
    target_role: &str,
    limit: Duration,
) -> Result<LearningPlan, AppError> {
    let extracted_skills = extract_skills(backend, resume_text, limit).await;
    let missing_skills = find_missing_skills(backend, &extracted_skills, target_role, limit).await?;
    info!(
        "Skill gap for '{target_role}': {} extracted, {} missing",
        extracted_skills.len(),
        missing_skills.len()
    );

    let weekly_tasks = generate_weekly_tasks(backend, &missing_skills, limit)
        .await
        .unwrap_or_else(|e| {
            warn!("Weekly task generation failed, using template: {e}");
            missing_skills.iter().map(|s| template_tasks(s)).collect()
        });

    Ok(LearningPlan {
        extracted_skills,
        missing_skills,
        weekly_tasks,
    })
}

/// Parses a weekly-tasks reply; skills the reply leaves out are not added.
/// Falls back to the template for every skill when nothing usable came back.
pub fn tasks_or_template(reply: &str, missing_skills: &[String]) -> Vec<WeeklyTasks> {
    let parsed: WeeklyTasksReply = parse_json_reply(reply).unwrap_or_default();
    let tasks: Vec<WeeklyTasks> = parsed
        .weekly_tasks
        .into_iter()
        .filter_map(|entry| {
            let skill = entry.skill.trim().to_string();
            let tasks: Vec<String> = entry
                .tasks
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .take(MAX_TASKS_PER_SKILL)
                .collect();
            (!skill.is_empty() && !tasks.is_empty()).then_some(WeeklyTasks { skill, tasks })
        })
        .collect();

    if tasks.is_empty() {
        missing_skills.iter().map(|s| template_tasks(s)).collect()
    } else {
        tasks
    }
}

/// Fixed seven-week study plan used when the model gives nothing usable.
pub fn template_tasks(skill: &str) -> WeeklyTasks {
    WeeklyTasks {
        skill: skill.to_string(),
        tasks: vec![
            format!("Study {skill} fundamentals and core concepts"),
            format!("Complete online {skill} tutorial or course"),
            format!("Practice {skill} with hands-on exercises"),
            format!("Build a small project using {skill}"),
            format!("Read {skill} documentation and best practices"),
            format!("Join {skill} community and participate in discussions"),
            format!("Create a portfolio piece showcasing {skill}"),
        ],
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len());
    for item in &items {
        push_unique(&mut out, item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{FakeBackend, Reply};

    const LIMIT: Duration = Duration::from_secs(30);

    fn text(s: &str) -> Reply {
        Reply::Text(s.to_string())
    }

    #[test]
    fn test_template_has_seven_tasks_naming_the_skill() {
        let plan = template_tasks("Kafka");
        assert_eq!(plan.tasks.len(), MAX_TASKS_PER_SKILL);
        assert!(plan.tasks.iter().all(|t| t.contains("Kafka")));
        assert_eq!(plan.tasks[0], "Study Kafka fundamentals and core concepts");
    }

    #[test]
    fn test_tasks_from_reply_are_capped() {
        let reply = r#"{"weekly_tasks": [{"skill": "Go", "tasks": ["1","2","3","4","5","6","7","8","9"]}]}"#;
        let tasks = tasks_or_template(reply, &["Go".into()]);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].tasks.len(), MAX_TASKS_PER_SKILL);
    }

    #[test]
    fn test_unusable_reply_falls_back_to_template() {
        let skills = vec!["Go".to_string(), "Terraform".to_string()];
        for reply in ["I cannot help with that", r#"{"weekly_tasks": []}"#, r#"{"weekly_tasks": [{"skill": "Go", "tasks": []}]}"#] {
            let tasks = tasks_or_template(reply, &skills);
            assert_eq!(tasks, vec![template_tasks("Go"), template_tasks("Terraform")]);
        }
    }

    #[tokio::test]
    async fn test_extract_skills_degrades_on_upstream_failure() {
        let backend = FakeBackend::replying(vec![Reply::Fail(500)]);
        assert!(extract_skills(&backend, "resume", LIMIT).await.is_empty());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_skill_gap_pipeline() {
        let backend = FakeBackend::replying(vec![
            text(r#"{"skills": ["Python", "SQL", "python"]}"#),
            text("```json\n{\"missing_skills\": [\"Spark\"]}\n```"),
            text(r#"{"weekly_tasks": [{"skill": "Spark", "tasks": ["Install Spark", "Run a word count job"]}]}"#),
        ]);

        let plan = plan_skill_gap(&backend, "Jane, Python and SQL", "Data Engineer", LIMIT)
            .await
            .unwrap();

        assert_eq!(plan.extracted_skills, vec!["Python", "SQL"]);
        assert_eq!(plan.missing_skills, vec!["Spark"]);
        assert_eq!(plan.weekly_tasks[0].tasks, vec!["Install Spark", "Run a word count job"]);
        assert_eq!(backend.calls(), 3);
        assert!(backend.prompts()[1].contains("Candidate's Skills: Python, SQL"));
    }

    #[tokio::test]
    async fn test_skill_gap_continues_when_extraction_fails() {
        let backend = FakeBackend::replying(vec![
            Reply::Fail(500),
            text(r#"{"missing_skills": ["Go"]}"#),
            Reply::Fail(500),
        ]);

        let plan = plan_skill_gap(&backend, "resume", "Backend Engineer", LIMIT)
            .await
            .unwrap();

        assert!(plan.extracted_skills.is_empty());
        assert!(backend.prompts()[1].contains("None listed"));
        assert_eq!(plan.weekly_tasks, vec![template_tasks("Go")]);
    }

    #[tokio::test]
    async fn test_skill_gap_step_failure_is_an_error() {
        let backend = FakeBackend::replying(vec![text(r#"{"skills": []}"#), Reply::Fail(502)]);
        let err = plan_skill_gap(&backend, "resume", "SRE", LIMIT).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_no_missing_skills_skips_task_generation() {
        let backend = FakeBackend::replying(vec![
            text(r#"{"skills": ["Rust"]}"#),
            text(r#"{"missing_skills": []}"#),
        ]);
        let plan = plan_skill_gap(&backend, "resume", "Rust Engineer", LIMIT)
            .await
            .unwrap();
        assert!(plan.weekly_tasks.is_empty());
        assert_eq!(backend.calls(), 2);
    }
}
