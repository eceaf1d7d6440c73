//! Test utilities for building seeded task stores
//!
//! Only compiled for tests or with the `test-utils` feature enabled.

use crate::database::TaskStore;
use crate::models::Priority;
use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

/// A deterministic timestamp `offset_secs` seconds past a fixed base, for
/// tests that need a known creation order
#[must_use]
pub fn timestamp(offset_secs: i64) -> DateTime<Utc> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    base + Duration::seconds(offset_secs)
}

/// Insert a task row directly with an explicit creation timestamp, bypassing
/// `create_task` so ordering tests are not at the mercy of the wall clock.
/// Returns the new task's id.
///
/// # Panics
///
/// Panics if the insert fails; this is test scaffolding.
pub async fn insert_task_at(
    store: &TaskStore,
    title: &str,
    priority: Priority,
    completed: bool,
    created_at: DateTime<Utc>,
) -> i64 {
    let result = sqlx::query(
        "INSERT INTO tasks (title, description, completed, priority, created_at) \
         VALUES (?, '', ?, ?, ?)",
    )
    .bind(title)
    .bind(completed)
    .bind(priority.as_str())
    .bind(created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .execute(store.pool())
    .await
    .expect("test task insert failed");

    result.last_insert_rowid()
}
