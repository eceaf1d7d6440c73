//! Rule-based subtask suggestions
//!
//! Expands a task title into eight fixed phase strings (research, planning,
//! execution, review). Pure string formatting; no stored state.

/// Phase templates applied to a task title, in presentation order
const PHASE_TEMPLATES: [&str; 8] = [
    "Research requirements for: {}",
    "Gather necessary resources for: {}",
    "Create detailed plan for: {}",
    "Define milestones for: {}",
    "Implement core features of: {}",
    "Test and validate: {}",
    "Review and refine: {}",
    "Document progress on: {}",
];

/// Expand a task title into the fixed subtask phase strings
#[must_use]
pub fn suggest_subtasks(title: &str) -> Vec<String> {
    PHASE_TEMPLATES
        .iter()
        .map(|template| template.replace("{}", title))
        .collect()
}
