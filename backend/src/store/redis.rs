//! Redis-backed task store.
//!
//! Key layout, under an optional key prefix:
//!
//! - `task:{id}` holds the task record as JSON
//! - `tasks:index` is a list of ids in insertion order
//!
//! Updates read the record, change it locally and write it back with a Lua
//! compare-and-set, retrying when another writer got there first.

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, Script};
use todo_shared::Task;
use uuid::Uuid;

use super::{StoreError, TaskStore};

const TASK_KEY_PREFIX: &str = "task:";
const TASK_INDEX_KEY: &str = "tasks:index";

/// Rounds of read, change and compare-and-set before giving up.
const MODIFY_ATTEMPTS: usize = 16;

/// Writes ARGV[2] only if the key still holds ARGV[1].
/// Returns 1 on success, 0 when the record changed or vanished.
const COMPARE_AND_SET: &str = r"
local current = redis.call('GET', KEYS[1])
if current == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2])
    return 1
end
return 0
";

#[derive(Clone)]
pub struct RedisTaskStore {
    connection: MultiplexedConnection,
    key_prefix: String,
}

impl RedisTaskStore {
    /// Opens a multiplexed connection to `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        tracing::info!("Connected to Redis");
        Ok(Self {
            connection,
            key_prefix: String::new(),
        })
    }

    /// Puts every key this store touches under `prefix`.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn task_key(&self, id: &Uuid) -> String {
        format!("{}{TASK_KEY_PREFIX}{id}", self.key_prefix)
    }

    pub fn index_key(&self) -> String {
        format!("{}{TASK_INDEX_KEY}", self.key_prefix)
    }
}

impl TaskStore for RedisTaskStore {
    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        let mut connection = self.connection.clone();
        let ids: Vec<String> = connection.lrange(self.index_key(), 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids
            .iter()
            .map(|id| format!("{}{TASK_KEY_PREFIX}{id}", self.key_prefix))
            .collect();
        let records: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut connection)
            .await?;

        let mut tasks = Vec::with_capacity(records.len());
        for (key, record) in keys.iter().zip(records) {
            match record {
                Some(json) => tasks.push(serde_json::from_str(&json)?),
                None => tracing::warn!(%key, "Indexed task has no record"),
            }
        }
        Ok(tasks)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let mut connection = self.connection.clone();
        let record: Option<String> = connection.get(self.task_key(&id)).await?;
        record
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        let json = serde_json::to_string(task)?;
        let mut connection = self.connection.clone();
        redis::pipe()
            .atomic()
            .set(self.task_key(&task.id), json)
            .ignore()
            .rpush(self.index_key(), task.id.to_string())
            .ignore()
            .query_async::<_, ()>(&mut connection)
            .await?;
        Ok(())
    }

    async fn modify<F>(&self, id: Uuid, change: F) -> Result<Option<Task>, StoreError>
    where
        F: Fn(&mut Task) + Send + Sync,
    {
        let key = self.task_key(&id);
        let script = Script::new(COMPARE_AND_SET);
        let mut connection = self.connection.clone();

        for _ in 0..MODIFY_ATTEMPTS {
            let current: Option<String> = connection.get(&key).await?;
            let Some(current) = current else {
                return Ok(None);
            };

            let mut task: Task = serde_json::from_str(&current)?;
            change(&mut task);
            let json = serde_json::to_string(&task)?;

            let swapped: i64 = script
                .key(&key)
                .arg(&current)
                .arg(&json)
                .invoke_async(&mut connection)
                .await?;
            if swapped == 1 {
                return Ok(Some(task));
            }
            tracing::debug!(%key, "Record changed under an update, retrying");
        }

        tracing::warn!(%key, attempts = MODIFY_ATTEMPTS, "Giving up on a contended update");
        Err(StoreError::Conflict(id))
    }
}
