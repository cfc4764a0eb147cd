use chrono::Utc;
use todo_shared::{CreateTaskRequest, Task, UpdateTaskRequest};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::store::TaskStore;

/// Task operations over a [`TaskStore`].
///
/// Cheap to clone; it is the axum router state.
#[derive(Debug, Clone)]
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All tasks that are not soft-deleted, in insertion order.
    pub async fn list(&self) -> Result<Vec<Task>, ServiceError> {
        let mut tasks = self.store.all().await?;
        tasks.retain(|task| !task.deleted);
        Ok(tasks)
    }

    /// One task by id, soft-deleted or not.
    pub async fn get(&self, id: Uuid) -> Result<Task, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn create(&self, request: CreateTaskRequest) -> Result<Task, ServiceError> {
        let task = Task::new(request.validate()?);
        self.store.insert(&task).await?;
        tracing::info!(id = %task.id, due_date = %task.due_date, "Task created");
        Ok(task)
    }

    /// Merges `patch` onto the stored task in one atomic store step.
    ///
    /// An empty patch succeeds without writing and returns the current record.
    pub async fn update(&self, id: Uuid, patch: UpdateTaskRequest) -> Result<Task, ServiceError> {
        patch.validate()?;
        if patch.is_empty() {
            tracing::debug!(%id, "Empty patch, nothing to update");
            return self.get(id).await;
        }

        let completed = patch.completed;
        let now = Utc::now();
        let task = self
            .store
            .modify(id, |task| task.apply(patch.clone(), now))
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        tracing::info!(%id, ?completed, "Task updated");
        Ok(task)
    }

    /// Marks the task deleted. The record stays in the store.
    pub async fn soft_delete(&self, id: Uuid) -> Result<Task, ServiceError> {
        let task = self
            .store
            .modify(id, Task::soft_delete)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        tracing::info!(%id, "Task soft-deleted");
        Ok(task)
    }
}
