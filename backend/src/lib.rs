//! Task store service: a REST API over soft-deletable, due-dated tasks.

use std::path::Path;

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod service;
pub mod store;

pub use config::{Config, ConfigError, StoreBackend};
pub use error::{ApiError, ServiceError};
pub use service::TaskService;
pub use store::{InMemoryTaskStore, RedisTaskStore, StoreError, TaskStore};

/// The `/api` routes plus `/health`, without static files.
pub fn api_router<S: TaskStore>(service: TaskService<S>) -> Router {
    let tasks = Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks::<S>).post(handlers::create_task::<S>),
        )
        .route(
            "/tasks/:id",
            get(handlers::get_task::<S>).put(handlers::update_task::<S>),
        )
        .route("/tasks/:id/delete", patch(handlers::delete_task::<S>));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", tasks)
        .with_state(service)
}

/// Full application: API, built frontend as fallback, CORS and request tracing.
pub fn app<S: TaskStore>(service: TaskService<S>, static_dir: &Path) -> Router {
    api_router(service)
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
