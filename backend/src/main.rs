use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_backend::{app, Config, InMemoryTaskStore, RedisTaskStore, StoreBackend, TaskService};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(error) = run().await {
        tracing::error!("{error:#}");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Configuration error")?;
    let address = config.socket_addr()?;
    tracing::info!(
        store_backend = ?config.store_backend,
        static_dir = %config.static_dir.display(),
        "Configuration loaded"
    );

    let application = match config.store_backend {
        StoreBackend::Redis => {
            let store = RedisTaskStore::connect(&config.redis_url)
                .await
                .with_context(|| format!("Failed to connect to Redis at {}", config.redis_url))?;
            app(TaskService::new(store), &config.static_dir)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, tasks are lost on exit");
            app(TaskService::new(InMemoryTaskStore::new()), &config.static_dir)
        }
    };

    serve(application, address).await
}

async fn serve(application: Router, address: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind to address {address}"))?;

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on http://{}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

/// Completes on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
