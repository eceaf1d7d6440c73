//! HTTP API surface: route handlers and error mapping
//!
//! The handlers are thin: they parse parameters, call into the store or the
//! query composer, and serialize the result. All task semantics live in
//! `taskdeck-core`.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use taskdeck_core::{
    suggest_subtasks, CreateTaskRequest, Task, TaskCounts, TaskQuery, TaskStore, TaskdeckError,
    UpdateTaskRequest,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, instrument};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TaskStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the API router over the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/task/:id", put(update_task).delete(delete_task))
        .route("/api/tasks/clear-completed", delete(clear_completed))
        .route("/api/tasks/breakdown", post(breakdown_task))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error wrapper translating core errors into HTTP responses
#[derive(Debug)]
pub struct ApiError(TaskdeckError);

impl From<TaskdeckError> for ApiError {
    fn from(e: TaskdeckError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TaskdeckError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            TaskdeckError::TaskNotFound { .. } => {
                (StatusCode::NOT_FOUND, "Task not found.".to_string())
            }
            other => {
                // Storage faults surface as a generic message; the store has
                // already rolled back, so no partial mutation is visible.
                error!("Request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Malformed or mistyped request bodies (e.g. a non-boolean `completed`)
/// are client errors, not the 422 axum defaults to.
fn invalid_body(rejection: &JsonRejection) -> ApiError {
    ApiError(TaskdeckError::validation(format!(
        "Invalid request body: {rejection}"
    )))
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    filter: Option<String>,
    search: Option<String>,
    sort: Option<String>,
}

#[derive(Debug, Serialize)]
struct TaskListResponse {
    tasks: Vec<Task>,
    counts: TaskCounts,
}

#[instrument(skip(state))]
async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let query = TaskQuery::from_params(
        params.filter.as_deref(),
        params.search.as_deref(),
        params.sort.as_deref(),
    );

    let tasks = state.store.query_tasks(&query).await?;
    let counts = state.store.task_counts().await?;

    Ok(Json(TaskListResponse { tasks, counts }))
}

#[instrument(skip_all)]
async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(request) = body.map_err(|e| invalid_body(&e))?;
    let task = state.store.create_task(&request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(skip(state, body))]
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    // Unknown ids take precedence over malformed bodies: look the task up
    // before rejecting the payload.
    state.store.get_task(id).await?;
    let Json(request) = body.map_err(|e| invalid_body(&e))?;
    let task = state.store.update_task(id, &request).await?;
    Ok(Json(task))
}

#[instrument(skip(state))]
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.store.delete_task(id).await?;
    Ok(Json(json!({ "message": "Task deleted successfully." })))
}

#[instrument(skip(state))]
async fn clear_completed(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state.store.clear_completed().await?;
    Ok(Json(json!({
        "message": format!("Successfully cleared {removed} completed tasks.")
    })))
}

#[derive(Debug, Default, Deserialize)]
struct BreakdownRequest {
    title: Option<String>,
}

#[instrument(skip_all)]
async fn breakdown_task(
    body: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(request) = body.map_err(|e| invalid_body(&e))?;
    let subtasks = suggest_subtasks(request.title.as_deref().unwrap_or(""));
    Ok(Json(json!({ "subtasks": subtasks })))
}
