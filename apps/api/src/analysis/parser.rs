//! Best-effort mapping from raw model output to `AnalysisResult`.
//!
//! Tried in order:
//! 1. a JSON object whose keys match the result shape (camelCase or snake_case)
//! 2. labelled sections (`Technical Skills: ...`, `## Achievements`, bullet lists)
//! 3. fallback: empty categories with the full text in `raw_response`
//!
//! Never fails. Empty input yields an empty result with no fallback text.

use serde_json::{Map, Value};
use tracing::warn;

use crate::llm_client::extract_json_object;
use crate::models::analysis::{AnalysisResult, MatchScore};
use crate::models::push_unique;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    TechnicalSkills,
    SoftSkills,
    Experience,
    Achievements,
    MatchScore,
}

const TECHNICAL_KEYS: &[&str] = &["technicalSkills", "technical_skills", "skills"];
const SOFT_KEYS: &[&str] = &["softSkills", "soft_skills"];
const EXPERIENCE_KEYS: &[&str] = &[
    "experience",
    "experienceSummary",
    "experience_summary",
    "yearsExperience",
    "years_experience",
];
const ACHIEVEMENT_KEYS: &[&str] = &["achievements", "keyAchievements", "key_achievements"];
const MATCH_KEYS: &[&str] = &["matchScore", "match_score", "fitScore", "fit_score"];

/// Placeholder answers models give for an empty section.
const EMPTY_MARKERS: &[&str] = &["none", "n/a", "na", "null", "-", "not specified", "not mentioned"];

pub fn parse_analysis(raw: &str) -> AnalysisResult {
    let text = raw.trim();
    if text.is_empty() {
        return AnalysisResult::default();
    }

    if let Some(result) = parse_json_shape(text) {
        return result;
    }

    if let Some(result) = parse_sections(text) {
        return result;
    }

    warn!(
        "Model output matched no known structure ({} bytes); returning raw text",
        text.len()
    );
    AnalysisResult {
        raw_response: Some(text.to_string()),
        ..Default::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JSON replies
// ────────────────────────────────────────────────────────────────────────────

fn parse_json_shape(text: &str) -> Option<AnalysisResult> {
    let value: Value = serde_json::from_str(extract_json_object(text)).ok()?;
    let object = value.as_object()?;

    let technical = lookup(object, TECHNICAL_KEYS);
    let soft = lookup(object, SOFT_KEYS);
    let experience = lookup(object, EXPERIENCE_KEYS);
    let achievements = lookup(object, ACHIEVEMENT_KEYS);
    let match_score = lookup(object, MATCH_KEYS);

    if [technical, soft, experience, achievements, match_score]
        .iter()
        .all(Option::is_none)
    {
        return None;
    }

    let mut result = AnalysisResult::default();
    for skill in technical.map(json_list).unwrap_or_default() {
        push_unique(&mut result.technical_skills, &skill);
    }
    for skill in soft.map(json_list).unwrap_or_default() {
        push_unique(&mut result.soft_skills, &skill);
    }
    result.experience = experience.map(json_text).unwrap_or_default();
    result.achievements = achievements.map(json_list).unwrap_or_default();
    result.match_score = match_score.and_then(json_score);
    Some(result)
}

fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| object.get(*k))
        .find(|v| !v.is_null())
}

fn json_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(json_text)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => split_items(s),
        _ => vec![],
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(json_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

fn json_score(value: &Value) -> Option<MatchScore> {
    match value {
        Value::Number(n) => n.as_f64().map(MatchScore::Number),
        Value::String(s) => parse_score(s),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Labelled sections
// ────────────────────────────────────────────────────────────────────────────

fn parse_sections(text: &str) -> Option<AnalysisResult> {
    let mut result = AnalysisResult::default();
    let mut experience_lines: Vec<String> = vec![];
    let mut match_lines: Vec<String> = vec![];
    let mut current: Option<Section> = None;
    let mut recognised = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("```") {
            continue;
        }

        let content = match split_header(line) {
            Some((section, rest)) => {
                current = Some(section);
                recognised = true;
                rest
            }
            None => strip_list_marker(line),
        };

        let content = clean(content);
        if content.is_empty() || is_empty_marker(&content) {
            continue;
        }

        match current {
            Some(Section::TechnicalSkills) => {
                for skill in split_items(&content) {
                    push_unique(&mut result.technical_skills, &skill);
                }
            }
            Some(Section::SoftSkills) => {
                for skill in split_items(&content) {
                    push_unique(&mut result.soft_skills, &skill);
                }
            }
            Some(Section::Experience) => experience_lines.push(content),
            Some(Section::Achievements) => result.achievements.push(content),
            Some(Section::MatchScore) => match_lines.push(content),
            // preamble before the first header
            None => {}
        }
    }

    if !recognised {
        return None;
    }

    result.experience = experience_lines.join(" ");
    if !match_lines.is_empty() {
        result.match_score = parse_score(&match_lines.join(" "));
    }
    Some(result)
}

/// Text allowed between a section label and its content.
const LABEL_SEPARATORS: [&str; 4] = [":", " - ", " \u{2014} ", " \u{2013} "];

/// Recognises a header line, returning its section and any content after the label.
fn split_header(line: &str) -> Option<(Section, &str)> {
    let body = strip_list_marker(line);
    let body = body.trim_start_matches('#').trim();

    let (label, rest) = LABEL_SEPARATORS
        .iter()
        .filter_map(|sep| body.find(sep).map(|idx| (idx, sep.len())))
        .min_by_key(|&(idx, _)| idx)
        .map_or((body, ""), |(idx, len)| (&body[..idx], &body[idx + len..]));
    let section = classify_label(label)?;
    Some((section, rest.trim_start_matches(['*', '_']).trim()))
}

fn classify_label(label: &str) -> Option<Section> {
    let label = label
        .trim_matches(|c: char| c == '*' || c == '_' || c == '#' || c.is_whitespace())
        .to_lowercase();

    let section = match label.as_str() {
        "technical skills" | "technical skill" | "technical" | "hard skills" | "skills"
        | "tech stack" | "technologies" | "technical_skills" | "technicalskills" => {
            Section::TechnicalSkills
        }
        "soft skills" | "soft skill" | "interpersonal skills" | "soft_skills"
        | "softskills" => Section::SoftSkills,
        "experience" | "experience summary" | "work experience" | "professional experience"
        | "years of experience" | "years experience" | "summary" => Section::Experience,
        "achievements" | "key achievements" | "notable achievements" | "accomplishments"
        | "key accomplishments" => Section::Achievements,
        "match score" | "match" | "fit score" | "job match" | "match assessment"
        | "fit assessment" | "match_score" | "matchscore" => Section::MatchScore,
        _ => return None,
    };
    Some(section)
}

/// Drops a leading bullet (`-`, `*`, `•`) or ordinal (`1.`, `2)`).
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix('•'))
    {
        return rest.trim();
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest.trim();
        }
    }
    line
}

/// Removes Markdown emphasis and surrounding punctuation noise.
fn clean(content: &str) -> String {
    content
        .replace("**", "")
        .replace('`', "")
        .trim()
        .trim_end_matches('.')
        .trim()
        .to_string()
}

fn is_empty_marker(content: &str) -> bool {
    EMPTY_MARKERS
        .iter()
        .any(|m| content.eq_ignore_ascii_case(m))
}

/// Splits a comma/semicolon list into trimmed items.
fn split_items(content: &str) -> Vec<String> {
    content
        .split([',', ';'])
        .map(clean)
        .filter(|s| !s.is_empty() && !is_empty_marker(s))
        .collect()
}

/// `"85"`, `"85%"`, `"85/100"` become numbers; anything else is kept as text.
fn parse_score(content: &str) -> Option<MatchScore> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    let numeric = content
        .split('/')
        .next()
        .unwrap_or(content)
        .trim()
        .trim_end_matches('%')
        .trim();
    Some(match numeric.parse::<f64>() {
        Ok(n) if n.is_finite() => MatchScore::Number(n),
        _ => MatchScore::Text(content.to_string()),
    })
}
