//! Taskdeck Core - task store and query composer for the taskdeck backend
//!
//! This library owns the durable collection of task records and the logic
//! that turns filter/search/sort request parameters into one deterministic
//! result set plus aggregate counts.
//!
//! # Quick Start
//!
//! ```no_run
//! use taskdeck_core::{CreateTaskRequest, TaskQuery, TaskStore};
//! use std::path::Path;
//!
//! # async fn example() -> taskdeck_core::Result<()> {
//! let store = TaskStore::open(Path::new("tasks.db")).await?;
//!
//! store
//!     .create_task(&CreateTaskRequest {
//!         title: Some("Write report".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let query = TaskQuery::from_params(Some("active"), Some("report"), Some("priority"));
//! let tasks = store.query_tasks(&query).await?;
//! println!("{} matching tasks", tasks.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Features
//!
//! - `test-utils`: Enable test utilities (for testing only)

pub mod breakdown;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod query;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use breakdown::suggest_subtasks;
pub use config::{TaskdeckConfig, DEFAULT_PORT};
pub use database::TaskStore;
pub use error::{Result, TaskdeckError};
pub use models::{
    CreateTaskRequest, Priority, Task, TaskCounts, UpdateTaskRequest, DESCRIPTION_MAX_CHARS,
    TITLE_MAX_CHARS,
};
pub use query::{CompletionFilter, SortKey, TaskQuery};

/// Re-export commonly used types
pub use chrono::{DateTime, Utc};
