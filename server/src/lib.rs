//! HTTP service managing todo items in process memory.
//!
//! The store is built by the caller and injected into the router, so tests
//! and `main` each get their own instance:
//!
//! ```no_run
//! # async fn demo() -> std::io::Result<()> {
//! use std::sync::Arc;
//! use todo_server::{app, config::Settings, run, store::TodoStore};
//!
//! let settings = Arc::new(Settings::default());
//! let listener = tokio::net::TcpListener::bind(settings.bind_address()).await?;
//! run(listener, app(TodoStore::new(), settings)).await
//! # }
//! ```

pub mod config;
pub mod docs;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tokio::{net::TcpListener, signal};

pub use error::TodoError;
pub use models::{Todo, TodoInput};
pub use store::TodoStore;

use crate::config::Settings;
use crate::routes::AppState;

pub fn app(store: TodoStore, settings: Arc<Settings>) -> Router {
    routes::router(AppState { store, settings })
}

/// Serves `app` until Ctrl-C or SIGTERM, then drains in-flight requests.
pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl-C");
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
                tracing::error!(%error, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received, draining connections");
}
