//! Data models for taskdeck entities

use crate::error::{Result, TaskdeckError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a task title, in characters
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum length of a task description, in characters
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Task priority enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Low")]
    Low,
    #[default]
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "High")]
    High,
}

impl Priority {
    /// Parse an exact priority label. Matching is case-sensitive: the wire
    /// format uses the canonical `Low`/`Medium`/`High` labels only.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    /// Canonical label for this priority
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Sort rank: High sorts first
    #[must_use]
    pub const fn rank(self) -> i64 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

/// Main task entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store on creation
    pub id: i64,
    /// Task title
    pub title: String,
    /// Task details (empty string if absent)
    pub description: String,
    /// Completion status
    pub completed: bool,
    /// Task priority
    pub priority: Priority,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Task creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (required)
    pub title: Option<String>,
    /// Task details (optional)
    pub description: Option<String>,
    /// Priority label; anything outside {Low, Medium, High} falls back to Medium
    pub priority: Option<String>,
}

/// Partial update request. Each field is independently absent-or-present;
/// absent fields retain their prior values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Whether the request carries no fields at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }
}

/// Aggregate task counts over the full collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub total: u64,
    pub pending: u64,
    pub completed: u64,
}

/// Trim and validate a title for persistence
///
/// # Errors
///
/// Returns a `Validation` error if the title is empty after trimming or
/// exceeds [`TITLE_MAX_CHARS`]
pub fn normalize_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskdeckError::validation("Title is required."));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(TaskdeckError::validation(format!(
            "Title must be at most {TITLE_MAX_CHARS} characters."
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim and validate a description for persistence
///
/// # Errors
///
/// Returns a `Validation` error if the description exceeds
/// [`DESCRIPTION_MAX_CHARS`]
pub fn normalize_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(TaskdeckError::validation(format!(
            "Description must be at most {DESCRIPTION_MAX_CHARS} characters."
        )));
    }
    Ok(trimmed.to_string())
}
