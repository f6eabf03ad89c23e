use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::room::{Relay, RelayHandle};
use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::routing::get;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared state handed to every WebSocket connection.
pub struct AppState {
    pub signaling: SignalingService,
    pub relay: RelayHandle,
    pub config: ServerConfig,
}

impl AppState {
    /// Creates the connection table and starts the relay event loop.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: ServerConfig) -> (Arc<Self>, JoinHandle<()>) {
        let signaling = SignalingService::new();
        let output = Arc::new(signaling.clone());
        let (relay, relay_task) = Relay::spawn(config.command_buffer, output);

        let state = Arc::new(Self {
            signaling,
            relay,
            config,
        });

        (state, relay_task)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

/// Binds `config.bind_addr` and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    serve_with_listener(listener, config, shutdown_signal()).await
}

pub async fn serve_with_listener<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (state, relay_task) = AppState::spawn(config);
    let app = router(state);

    info!("Signaling relay listening on ws://{}/ws", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    relay_task.abort();
    info!("Signaling relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
