//! Error types for the taskdeck core library

use thiserror::Error;

/// Result type alias for taskdeck operations
pub type Result<T> = std::result::Result<T, TaskdeckError>;

/// Main error type for taskdeck operations
#[derive(Error, Debug)]
pub enum TaskdeckError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task not found: {id}")]
    TaskNotFound { id: i64 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TaskdeckError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given task id
    #[must_use]
    pub const fn task_not_found(id: i64) -> Self {
        Self::TaskNotFound { id }
    }
}

impl From<sqlx::Error> for TaskdeckError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e.to_string())
    }
}
