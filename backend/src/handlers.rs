use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use serde_json::{json, Value};
use todo_shared::{CreateTaskRequest, Task, UpdateTaskRequest};
use uuid::Uuid;

use crate::error::ApiError;
use crate::service::TaskService;
use crate::store::TaskStore;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Ids that are not UUIDs cannot name a stored task.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!(id = raw, "Malformed task id");
        ApiError::task_not_found()
    })
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_tasks<S: TaskStore>(State(service): State<TaskService<S>>) -> ApiResult<Vec<Task>> {
    Ok(Json(service.list().await?))
}

pub async fn get_task<S: TaskStore>(
    Path(id): Path<String>,
    State(service): State<TaskService<S>>,
) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    Ok(Json(service.get(id).await?))
}

pub async fn create_task<S: TaskStore>(
    State(service): State<TaskService<S>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Task> {
    let Json(request) = payload?;
    Ok(Json(service.create(request).await?))
}

pub async fn update_task<S: TaskStore>(
    Path(id): Path<String>,
    State(service): State<TaskService<S>>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    Ok(Json(service.update(id, patch).await?))
}

pub async fn delete_task<S: TaskStore>(
    Path(id): Path<String>,
    State(service): State<TaskService<S>>,
) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    Ok(Json(service.soft_delete(id).await?))
}
