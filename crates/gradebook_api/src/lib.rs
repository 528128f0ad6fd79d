//! HTTP adapter for the gradebook records store.
//!
//! # Responsibility
//! - Map HTTP routes onto `RecordsService` use-cases.
//! - Translate service errors into status codes and `{"detail": ...}` bodies.
//! - Own the shared, lock-guarded store handle and the serve loop.
//!
//! # Invariants
//! - Handlers never hold the store lock across an `.await`.
//! - Mutations run under the write lock; reads under the read lock.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use log::info;
use std::future::Future;
use tokio::net::TcpListener;

/// Binds `config.bind` and serves until `shutdown` resolves.
///
/// # Errors
/// - Returns an error when the address cannot be bound.
/// - Returns an error when the accept loop fails.
pub async fn serve(
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let state = AppState::from_config(config);
    let listener = TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=api status=ok addr={} seeded={}",
        listener.local_addr()?,
        config.seed
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}
