// Skill analysis: prompt construction, one inference call, best-effort parsing.
// All inference goes through llm_client; parsing is pure and network-free.

pub mod analyzer;
pub mod handlers;
pub mod parser;
pub mod prompts;
