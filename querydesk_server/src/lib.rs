#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! HTTP surface: `/execute`, `/search` and the informational root.

mod error;
mod routes;
mod state;

use std::sync::Arc;

use tracing::info;

pub use error::{ApiError, ServerError};
pub use routes::{QueryParams, SearchResponse, app};
pub use state::AppState;

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(state: AppState, addr: &str) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("querydesk listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("querydesk stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to register SIGTERM handler: {e}");
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
    info!("Shutdown signal received");
}
