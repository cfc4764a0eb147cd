use std::sync::Arc;

use tokio::sync::RwLock;
use todo_shared::Task;
use uuid::Uuid;

use super::{StoreError, TaskStore};

/// Process-local store, used by the test suite and `STORE_BACKEND=memory`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryTaskStore {
    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks.write().await.push(task.clone());
        Ok(())
    }

    async fn modify<F>(&self, id: Uuid, change: F) -> Result<Option<Task>, StoreError>
    where
        F: Fn(&mut Task) + Send + Sync,
    {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|task| task.id == id).map(|task| {
            change(task);
            task.clone()
        }))
    }
}
