//! SQLite-backed task store
//!
//! All mutating operations are atomic: single statements rely on SQLite
//! statement atomicity, multi-step mutations run inside a transaction and
//! roll back on any error path.

use crate::{
    error::{Result, TaskdeckError},
    models::{normalize_description, normalize_title, CreateTaskRequest, Priority, Task, TaskCounts, UpdateTaskRequest},
    query::TaskQuery,
};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const TASK_COLUMNS: &str = "id, title, description, completed, priority, created_at";

/// Timestamps are stored as fixed-width RFC 3339 text so that lexicographic
/// order equals chronological order.
fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TaskdeckError::Database(format!("Invalid created_at value {raw:?}: {e}")))
}

fn task_from_row(row: &SqliteRow) -> Result<Task> {
    let priority_label: String = row.get("priority");
    let created_at: String = row.get("created_at");

    Ok(Task {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        completed: row.get("completed"),
        priority: Priority::from_label(&priority_label).unwrap_or_default(),
        created_at: decode_timestamp(&created_at)?,
    })
}

/// Durable store for task records over an sqlx connection pool
#[derive(Debug, Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    /// Open (creating if missing) the database file at `path` and bootstrap
    /// the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created
    #[instrument]
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Opened task database at {}", path.display());
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Open an in-memory database, mainly for tests. A single connection is
    /// used so every query sees the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Get the underlying connection pool
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tasks table if it does not exist. AUTOINCREMENT keeps ids
    /// from ever being reused after deletion.
    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                completed INTEGER NOT NULL DEFAULT 0,
                priority TEXT NOT NULL DEFAULT 'Medium',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        debug!("Task schema ready");
        Ok(())
    }

    /// Create a new task, assigning its id and creation timestamp.
    ///
    /// The title is required and trimmed; an unrecognized priority label
    /// falls back to Medium rather than failing the request.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for a missing/blank/overlong title or an
    /// overlong description; nothing is persisted in that case
    #[instrument(skip(self, request))]
    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        let title = normalize_title(request.title.as_deref().unwrap_or(""))?;
        let description = normalize_description(request.description.as_deref().unwrap_or(""))?;
        let priority = match request.priority.as_deref() {
            None => Priority::default(),
            Some(label) => Priority::from_label(label).unwrap_or_else(|| {
                warn!("Unrecognized priority {label:?}, storing Medium");
                Priority::Medium
            }),
        };

        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO tasks (title, description, completed, priority, created_at) \
             VALUES (?, ?, 0, ?, ?)",
        )
        .bind(&title)
        .bind(&description)
        .bind(priority.as_str())
        .bind(encode_timestamp(created_at))
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Created task {id}: {title}");
        self.get_task(id).await
    }

    /// Fetch a single task by id
    ///
    /// # Errors
    ///
    /// Returns `TaskNotFound` if the id is unknown
    #[instrument(skip(self))]
    pub async fn get_task(&self, id: i64) -> Result<Task> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => task_from_row(&row),
            None => Err(TaskdeckError::task_not_found(id)),
        }
    }

    /// Apply a partial update to a task. Only the fields present in the
    /// request change; the whole update commits or none of it does.
    ///
    /// # Errors
    ///
    /// Returns `TaskNotFound` for an unknown id and a `Validation` error for
    /// an empty title or an invalid priority label; prior state is left
    /// unchanged in both cases
    #[instrument(skip(self, request))]
    pub async fn update_task(&self, id: i64, request: &UpdateTaskRequest) -> Result<Task> {
        // A request carrying no fields changes nothing; skip the write
        // transaction entirely (still reports unknown ids).
        if request.is_empty() {
            return self.get_task(id).await;
        }

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let mut task = match row {
            Some(row) => task_from_row(&row)?,
            None => return Err(TaskdeckError::task_not_found(id)),
        };

        if let Some(title) = &request.title {
            if title.trim().is_empty() {
                return Err(TaskdeckError::validation("Title cannot be empty."));
            }
            task.title = normalize_title(title)?;
        }
        if let Some(description) = &request.description {
            task.description = normalize_description(description)?;
        }
        if let Some(label) = &request.priority {
            // Unlike creation, updates reject unknown labels outright.
            task.priority = Priority::from_label(label)
                .ok_or_else(|| TaskdeckError::validation("Invalid priority."))?;
        }
        if let Some(completed) = request.completed {
            task.completed = completed;
        }

        sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, completed = ?, priority = ? WHERE id = ?",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.priority.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Updated task {id}");
        Ok(task)
    }

    /// Delete a single task
    ///
    /// # Errors
    ///
    /// Returns `TaskNotFound` if the id is unknown
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskdeckError::task_not_found(id));
        }
        debug!("Deleted task {id}");
        Ok(())
    }

    /// Delete every completed task in one statement, returning how many
    /// rows were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    #[instrument(skip(self))]
    pub async fn clear_completed(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE completed = 1")
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected();
        debug!("Cleared {removed} completed tasks");
        Ok(removed)
    }

    /// Execute a composed query: the completion filter and ordering run in
    /// SQL, the search term is applied as an explicit lowercase substring
    /// match on the fetched rows (never the engine's collation).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    #[instrument(skip(self, query))]
    pub async fn query_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks");
        if let Some(predicate) = query.filter.where_sql() {
            sql.push_str(" WHERE ");
            sql.push_str(predicate);
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(query.sort.order_sql());

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in &rows {
            let task = task_from_row(row)?;
            if query.matches_search(&task) {
                tasks.push(task);
            }
        }

        debug!("Query matched {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Aggregate counts over the full collection, independent of any active
    /// filter or search
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails
    #[instrument(skip(self))]
    pub async fn task_counts(&self) -> Result<TaskCounts> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        let pending: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE completed = 0")
            .fetch_one(&self.pool)
            .await?;
        let completed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE completed = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(TaskCounts {
            total: u64::try_from(total).unwrap_or(0),
            pending: u64::try_from(pending).unwrap_or(0),
            completed: u64::try_from(completed).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{insert_task_at, timestamp};

    fn create_request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_task_assigns_id_and_defaults() {
        let store = TaskStore::in_memory().await.unwrap();

        let task = store.create_task(&create_request("Write report")).await.unwrap();

        assert!(task.id > 0);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[tokio::test]
    async fn test_create_task_trims_title_and_description() {
        let store = TaskStore::in_memory().await.unwrap();

        let task = store
            .create_task(&CreateTaskRequest {
                title: Some("  Write report  ".to_string()),
                description: Some("  quarterly numbers  ".to_string()),
                priority: None,
            })
            .await
            .unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.description, "quarterly numbers");
    }

    #[tokio::test]
    async fn test_create_task_rejects_blank_title_without_persisting() {
        let store = TaskStore::in_memory().await.unwrap();

        for title in [None, Some(String::new()), Some("   ".to_string())] {
            let result = store
                .create_task(&CreateTaskRequest {
                    title,
                    ..Default::default()
                })
                .await;
            assert!(matches!(result, Err(TaskdeckError::Validation { .. })));
        }

        let counts = store.task_counts().await.unwrap();
        assert_eq!(counts.total, 0);
    }

    #[tokio::test]
    async fn test_create_task_coerces_invalid_priority_to_medium() {
        let store = TaskStore::in_memory().await.unwrap();

        let task = store
            .create_task(&CreateTaskRequest {
                title: Some("Ship it".to_string()),
                description: None,
                priority: Some("Urgent".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(task.priority, Priority::Medium);
    }

    #[tokio::test]
    async fn test_create_task_accepts_valid_priority() {
        let store = TaskStore::in_memory().await.unwrap();

        let task = store
            .create_task(&CreateTaskRequest {
                title: Some("Ship it".to_string()),
                description: None,
                priority: Some("High".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(task.priority, Priority::High);
    }

    #[tokio::test]
    async fn test_get_task_unknown_id() {
        let store = TaskStore::in_memory().await.unwrap();

        let result = store.get_task(999).await;
        assert!(matches!(
            result,
            Err(TaskdeckError::TaskNotFound { id: 999 })
        ));
    }

    #[tokio::test]
    async fn test_update_task_partial_fields_retain_others() {
        let store = TaskStore::in_memory().await.unwrap();
        let task = store
            .create_task(&CreateTaskRequest {
                title: Some("Write report".to_string()),
                description: Some("quarterly numbers".to_string()),
                priority: Some("High".to_string()),
            })
            .await
            .unwrap();

        let updated = store
            .update_task(
                task.id,
                &UpdateTaskRequest {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, "Write report");
        assert_eq!(updated.description, "quarterly numbers");
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.created_at, task.created_at);
    }

    #[tokio::test]
    async fn test_update_task_rejects_empty_title_and_rolls_back() {
        let store = TaskStore::in_memory().await.unwrap();
        let task = store.create_task(&create_request("Write report")).await.unwrap();

        let result = store
            .update_task(
                task.id,
                &UpdateTaskRequest {
                    title: Some("   ".to_string()),
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(TaskdeckError::Validation { .. })));

        // The completed flag from the same request must not have landed.
        let unchanged = store.get_task(task.id).await.unwrap();
        assert_eq!(unchanged, task);
    }

    #[tokio::test]
    async fn test_update_task_rejects_invalid_priority() {
        let store = TaskStore::in_memory().await.unwrap();
        let task = store.create_task(&create_request("Write report")).await.unwrap();

        let result = store
            .update_task(
                task.id,
                &UpdateTaskRequest {
                    priority: Some("Urgent".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(TaskdeckError::Validation { .. })));
        assert_eq!(store.get_task(task.id).await.unwrap().priority, Priority::Medium);
    }

    #[tokio::test]
    async fn test_update_task_with_no_fields_is_a_no_op() {
        let store = TaskStore::in_memory().await.unwrap();
        let task = store.create_task(&create_request("Write report")).await.unwrap();

        let updated = store
            .update_task(task.id, &UpdateTaskRequest::default())
            .await
            .unwrap();
        assert_eq!(updated, task);

        // An empty request still reports an unknown id.
        assert!(matches!(
            store.update_task(999, &UpdateTaskRequest::default()).await,
            Err(TaskdeckError::TaskNotFound { id: 999 })
        ));
    }

    #[tokio::test]
    async fn test_update_task_unknown_id_leaves_store_unchanged() {
        let store = TaskStore::in_memory().await.unwrap();
        store.create_task(&create_request("Write report")).await.unwrap();

        let result = store
            .update_task(
                999,
                &UpdateTaskRequest {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(TaskdeckError::TaskNotFound { .. })));
        assert_eq!(store.task_counts().await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let store = TaskStore::in_memory().await.unwrap();
        let task = store.create_task(&create_request("Write report")).await.unwrap();

        store.delete_task(task.id).await.unwrap();
        assert!(matches!(
            store.get_task(task.id).await,
            Err(TaskdeckError::TaskNotFound { .. })
        ));

        // Deleting again reports not found.
        assert!(matches!(
            store.delete_task(task.id).await,
            Err(TaskdeckError::TaskNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = TaskStore::in_memory().await.unwrap();

        let first = store.create_task(&create_request("one")).await.unwrap();
        store.delete_task(first.id).await.unwrap();
        let second = store.create_task(&create_request("two")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_clear_completed_counts_removed_rows() {
        let store = TaskStore::in_memory().await.unwrap();
        for (title, completed) in [
            ("a", true),
            ("b", true),
            ("c", false),
            ("d", false),
            ("e", false),
        ] {
            let task = store.create_task(&create_request(title)).await.unwrap();
            if completed {
                store
                    .update_task(
                        task.id,
                        &UpdateTaskRequest {
                            completed: Some(true),
                            ..Default::default()
                        },
                    )
                    .await
                    .unwrap();
            }
        }

        let removed = store.clear_completed().await.unwrap();
        assert_eq!(removed, 2);

        let counts = store.task_counts().await.unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.completed, 0);
    }

    #[tokio::test]
    async fn test_clear_completed_with_nothing_to_clear() {
        let store = TaskStore::in_memory().await.unwrap();
        store.create_task(&create_request("pending")).await.unwrap();

        assert_eq!(store.clear_completed().await.unwrap(), 0);
        assert_eq!(store.task_counts().await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_filters_partition_the_collection() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "a", Priority::Medium, false, timestamp(1)).await;
        insert_task_at(&store, "b", Priority::Medium, true, timestamp(2)).await;
        insert_task_at(&store, "c", Priority::Medium, true, timestamp(3)).await;

        let all = store.query_tasks(&TaskQuery::default()).await.unwrap();
        let active = store
            .query_tasks(&TaskQuery::from_params(Some("active"), None, None))
            .await
            .unwrap();
        let completed = store
            .query_tasks(&TaskQuery::from_params(Some("completed"), None, None))
            .await
            .unwrap();

        assert_eq!(active.len() + completed.len(), all.len());
        assert!(active.iter().all(|t| !t.completed));
        assert!(completed.iter().all(|t| t.completed));
    }

    #[tokio::test]
    async fn test_default_sort_is_date_desc() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "oldest", Priority::Medium, false, timestamp(1)).await;
        insert_task_at(&store, "newest", Priority::Medium, false, timestamp(3)).await;
        insert_task_at(&store, "middle", Priority::Medium, false, timestamp(2)).await;

        let tasks = store.query_tasks(&TaskQuery::default()).await.unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_sort_date_asc() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "newest", Priority::Medium, false, timestamp(3)).await;
        insert_task_at(&store, "oldest", Priority::Medium, false, timestamp(1)).await;

        let tasks = store
            .query_tasks(&TaskQuery::from_params(None, None, Some("date_asc")))
            .await
            .unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["oldest", "newest"]);
    }

    #[tokio::test]
    async fn test_sort_priority_high_medium_low() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "high", Priority::High, false, timestamp(1)).await;
        insert_task_at(&store, "low", Priority::Low, false, timestamp(2)).await;
        insert_task_at(&store, "medium", Priority::Medium, false, timestamp(3)).await;

        let tasks = store
            .query_tasks(&TaskQuery::from_params(None, None, Some("priority")))
            .await
            .unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["high", "medium", "low"]);
    }

    #[tokio::test]
    async fn test_sort_priority_ties_break_by_date_desc() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "older high", Priority::High, false, timestamp(1)).await;
        insert_task_at(&store, "newer high", Priority::High, false, timestamp(2)).await;
        insert_task_at(&store, "low", Priority::Low, false, timestamp(3)).await;

        let tasks = store
            .query_tasks(&TaskQuery::from_params(None, None, Some("priority")))
            .await
            .unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["newer high", "older high", "low"]);
    }

    #[tokio::test]
    async fn test_sort_priority_is_non_decreasing_in_rank() {
        let store = TaskStore::in_memory().await.unwrap();
        let priorities = [
            Priority::Low,
            Priority::High,
            Priority::Medium,
            Priority::High,
            Priority::Low,
            Priority::Medium,
        ];
        for (i, priority) in priorities.into_iter().enumerate() {
            insert_task_at(&store, &format!("t{i}"), priority, false, timestamp(i as i64)).await;
        }

        let tasks = store
            .query_tasks(&TaskQuery::from_params(None, None, Some("priority")))
            .await
            .unwrap();
        let ranks: Vec<i64> = tasks.iter().map(|t| t.priority.rank()).collect();
        assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));

        // Within equal rank, created_at is non-increasing.
        for pair in tasks.windows(2) {
            if pair[0].priority == pair[1].priority {
                assert!(pair[0].created_at >= pair[1].created_at);
            }
        }
    }

    #[tokio::test]
    async fn test_sort_status_incomplete_first() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "done", Priority::Medium, true, timestamp(3)).await;
        insert_task_at(&store, "open old", Priority::Medium, false, timestamp(1)).await;
        insert_task_at(&store, "open new", Priority::Medium, false, timestamp(2)).await;

        let tasks = store
            .query_tasks(&TaskQuery::from_params(None, None, Some("status")))
            .await
            .unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["open new", "open old", "done"]);
    }

    #[tokio::test]
    async fn test_search_matches_title_or_description_case_insensitive() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "Write REPORT", Priority::Medium, false, timestamp(1)).await;
        let id = insert_task_at(&store, "Chores", Priority::Medium, false, timestamp(2)).await;
        store
            .update_task(
                id,
                &UpdateTaskRequest {
                    description: Some("weekly report notes".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        insert_task_at(&store, "Groceries", Priority::Medium, false, timestamp(3)).await;

        let tasks = store
            .query_tasks(&TaskQuery::from_params(None, Some("report"), None))
            .await
            .unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_search_combines_with_filter() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "report draft", Priority::Medium, false, timestamp(1)).await;
        insert_task_at(&store, "report final", Priority::Medium, true, timestamp(2)).await;

        let tasks = store
            .query_tasks(&TaskQuery::from_params(Some("active"), Some("report"), None))
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "report draft");
    }

    #[tokio::test]
    async fn test_counts_total_is_pending_plus_completed() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "a", Priority::Medium, false, timestamp(1)).await;
        insert_task_at(&store, "b", Priority::Medium, true, timestamp(2)).await;
        insert_task_at(&store, "c", Priority::Medium, true, timestamp(3)).await;

        let counts = store.task_counts().await.unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.completed, 2);
        assert_eq!(counts.total, counts.pending + counts.completed);
    }

    #[tokio::test]
    async fn test_counts_ignore_filter_and_search() {
        let store = TaskStore::in_memory().await.unwrap();
        insert_task_at(&store, "a", Priority::Medium, false, timestamp(1)).await;
        insert_task_at(&store, "b", Priority::Medium, true, timestamp(2)).await;

        // Counts are a property of the full collection; a filtered query
        // does not change them.
        let filtered = store
            .query_tasks(&TaskQuery::from_params(Some("completed"), Some("a"), None))
            .await
            .unwrap();
        assert!(filtered.is_empty());

        let counts = store.task_counts().await.unwrap();
        assert_eq!(counts.total, 2);
    }

    #[tokio::test]
    async fn test_timestamp_round_trip() {
        let now = Utc::now();
        let encoded = encode_timestamp(now);
        let decoded = decode_timestamp(&encoded).unwrap();
        // Micros precision is preserved through storage.
        assert_eq!(decoded.timestamp_micros(), now.timestamp_micros());
    }

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tasks.db");

        let store = TaskStore::open(&path).await.unwrap();
        store.create_task(&create_request("persisted")).await.unwrap();

        assert!(path.exists());
    }
}
