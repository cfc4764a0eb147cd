//! Shared helpers for the HTTP tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use todo_backend::{api_router, InMemoryTaskStore, StoreError, TaskService, TaskStore};
use todo_shared::Task;
use tower::ServiceExt;
use uuid::Uuid;

/// Router over a fresh in-memory store, plus a handle on that store.
pub fn test_app() -> (Router, InMemoryTaskStore) {
    let store = InMemoryTaskStore::new();
    (api_router(TaskService::new(store.clone())), store)
}

/// Sends one request and returns the status with the JSON body (`Null` if empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Store whose every call fails like an unreachable database.
#[derive(Debug, Clone, Default)]
pub struct FailingStore;

impl FailingStore {
    fn error() -> StoreError {
        StoreError::Backend("connection refused".to_owned())
    }
}

impl TaskStore for FailingStore {
    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        Err(Self::error())
    }

    async fn get(&self, _id: Uuid) -> Result<Option<Task>, StoreError> {
        Err(Self::error())
    }

    async fn insert(&self, _task: &Task) -> Result<(), StoreError> {
        Err(Self::error())
    }

    async fn modify<F>(&self, _id: Uuid, _change: F) -> Result<Option<Task>, StoreError>
    where
        F: Fn(&mut Task) + Send + Sync,
    {
        Err(Self::error())
    }
}

/// Wraps a store so that every `get` stalls before answering, widening the
/// window between reading a record and writing it back.
#[derive(Debug, Clone)]
pub struct SlowReads<S> {
    inner: S,
    delay: Duration,
}

impl<S> SlowReads<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<S: TaskStore> TaskStore for SlowReads<S> {
    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        self.inner.all().await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let task = self.inner.get(id).await;
        tokio::time::sleep(self.delay).await;
        task
    }

    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        self.inner.insert(task).await
    }

    async fn modify<F>(&self, id: Uuid, change: F) -> Result<Option<Task>, StoreError>
    where
        F: Fn(&mut Task) + Send + Sync,
    {
        self.inner.modify(id, change).await
    }
}
