// Shared prompt fragments.
// Each feature module that needs LLM calls defines its own prompts.rs alongside it.
// Ollama's /api/generate has no system role, so these are prepended to the prompt body.

/// Instruction appended to prompts whose replies are parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY valid JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Preamble for every resume-facing prompt.
pub const RECRUITER_PREAMBLE: &str = "You are an experienced technical recruiter. \
    Base every statement on the text provided. \
    Do NOT invent skills, employers or achievements that the text does not mention.";

/// Substitutes `{placeholder}` markers in a single left-to-right pass.
///
/// Inserted values are never rescanned, so braces inside resume text or a job
/// description reach the model verbatim. Unknown braces are kept as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        match values.iter().find(|(marker, _)| rest.starts_with(marker)) {
            Some((marker, value)) => {
                out.push_str(value);
                rest = &rest[marker.len()..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
