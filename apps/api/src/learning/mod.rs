// Learning Planner: skill extraction, gap analysis against a target role,
// and week-by-week study tasks for missing skills.

pub mod handlers;
pub mod planner;
pub mod prompts;
