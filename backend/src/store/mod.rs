//! Task persistence.
//!
//! A store only reads and writes whole records. Filtering deleted tasks,
//! validation and the completion timestamp live in [`crate::TaskService`].

use std::future::Future;

use thiserror::Error;
use todo_shared::Task;
use uuid::Uuid;

mod memory;
mod redis;

pub use self::memory::InMemoryTaskStore;
pub use self::redis::RedisTaskStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("task {0} kept changing during the update")]
    Conflict(Uuid),
}

impl From<::redis::RedisError> for StoreError {
    fn from(error: ::redis::RedisError) -> Self {
        Self::Backend(error.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Document store holding task records.
///
/// Every write touches a single record; implementations need no
/// cross-record transactions. Changes to an existing record go through
/// [`TaskStore::modify`] so that two concurrent writers never overwrite each
/// other with stale copies.
pub trait TaskStore: Clone + Send + Sync + 'static {
    /// Every stored record in insertion order, soft-deleted ones included.
    fn all(&self) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send;

    fn get(&self, id: Uuid) -> impl Future<Output = Result<Option<Task>, StoreError>> + Send;

    /// Stores a record that does not exist yet.
    fn insert(&self, task: &Task) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Applies `change` to the stored record as one atomic step and returns
    /// the result, or `None` when no record has this id.
    ///
    /// `change` may run more than once if the record moves underneath it.
    fn modify<F>(
        &self,
        id: Uuid,
        change: F,
    ) -> impl Future<Output = Result<Option<Task>, StoreError>> + Send
    where
        F: Fn(&mut Task) + Send + Sync;
}
