// Skill analysis prompt templates.

use crate::llm_client::prompts::{fill_template, RECRUITER_PREAMBLE};

/// Analysis prompt template. Replace `{preamble}`, `{resume_text}`, `{job_section}`
/// and `{match_section}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"{preamble}

Analyze the resume below and extract the candidate's skills, experience and achievements.

RESUME:
{resume_text}
{job_section}
Respond using EXACTLY these labelled sections and nothing else:
Technical Skills: <comma-separated list of tools, languages and technologies>
Soft Skills: <comma-separated list of interpersonal and leadership skills>
Experience: <one or two sentences summarising total experience, including years if stated>
Achievements:
- <one notable achievement per line>
{match_section}"#;

/// Inserted only when a job description is supplied.
pub const JOB_SECTION_TEMPLATE: &str = r#"
JOB DESCRIPTION:
{job_description}

Also assess how well the candidate fits this job description.
"#;

pub const MATCH_SECTION: &str =
    "Match Score: <a single number from 0 to 100 rating the fit against the job description>\n";

/// Builds the analysis prompt. The job-description block and match-score section
/// appear only when `job_description` is `Some`.
pub fn build_analysis_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let (job_section, match_section) = match job_description {
        Some(jd) => (
            fill_template(JOB_SECTION_TEMPLATE, &[("{job_description}", jd)]),
            MATCH_SECTION,
        ),
        None => (String::new(), ""),
    };

    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("{preamble}", RECRUITER_PREAMBLE),
            ("{resume_text}", resume_text),
            ("{job_section}", job_section.as_str()),
            ("{match_section}", match_section),
        ],
    )
}
