// Learning Planner prompt templates. Every reply is parsed as JSON.

use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION, RECRUITER_PREAMBLE};

/// Replace `{resume_text}` before sending.
pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"Analyze this resume and extract the candidate's skills.

RESUME:
{resume_text}

Return JSON in this exact format:
{
  "skills": ["skill1", "skill2"]
}"#;

/// Replace `{skills}` and `{target_role}` before sending.
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"Compare the candidate's skills against the requirements of the target role and identify the skills the candidate is missing.

Candidate's Skills: {skills}
Target Role: {target_role}

Return JSON in this exact format:
{
  "missing_skills": ["skill1", "skill2"]
}"#;

/// Replace `{skills}` before sending.
pub const WEEKLY_TASKS_PROMPT_TEMPLATE: &str = r#"Generate 5-7 practical weekly learning tasks for each missing skill.

Missing Skills: {skills}

Return JSON in this exact format:
{
  "weekly_tasks": [
    {"skill": "skill1", "tasks": ["task1", "task2", "task3", "task4", "task5"]}
  ]
}"#;

pub fn build_skill_extract_prompt(resume_text: &str) -> String {
    with_framing(&fill_template(
        SKILL_EXTRACT_PROMPT_TEMPLATE,
        &[("{resume_text}", resume_text)],
    ))
}

pub fn build_skill_gap_prompt(skills: &[String], target_role: &str) -> String {
    let skills = if skills.is_empty() {
        "None listed".to_string()
    } else {
        skills.join(", ")
    };
    with_framing(&fill_template(
        SKILL_GAP_PROMPT_TEMPLATE,
        &[("{skills}", skills.as_str()), ("{target_role}", target_role)],
    ))
}

pub fn build_weekly_tasks_prompt(missing_skills: &[String]) -> String {
    let skills = missing_skills.join(", ");
    with_framing(&fill_template(
        WEEKLY_TASKS_PROMPT_TEMPLATE,
        &[("{skills}", skills.as_str())],
    ))
}

fn with_framing(body: &str) -> String {
    format!("{RECRUITER_PREAMBLE}\n\n{body}\n\n{JSON_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_prompt_marks_empty_skill_list() {
        let prompt = build_skill_gap_prompt(&[], "Data Engineer");
        assert!(prompt.contains("Candidate's Skills: None listed"));
        assert!(prompt.contains("Target Role: Data Engineer"));
    }

    #[test]
    fn test_gap_prompt_keeps_braces_in_target_role() {
        let prompt = build_skill_gap_prompt(&["Rust".into()], "Engineer {skills}");
        assert!(prompt.contains("Target Role: Engineer {skills}"));
        assert_eq!(prompt.matches("Rust").count(), 1);
    }

    #[test]
    fn test_weekly_prompt_lists_skills_and_demands_json() {
        let prompt = build_weekly_tasks_prompt(&["Kafka".into(), "Go".into()]);
        assert!(prompt.contains("Missing Skills: Kafka, Go"));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }
}
