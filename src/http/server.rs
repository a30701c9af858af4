//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::NodeConfig;
use crate::http::handlers;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::parsing::Dispatcher;
use crate::peer::{PeerClient, PeerError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NodeConfig>,
    pub dispatcher: Arc<Dispatcher>,
    pub peer: PeerClient,
}

impl AppState {
    /// Build the per-node state. The peer is not contacted.
    pub fn new(config: NodeConfig) -> Result<Self, PeerError> {
        let dispatcher = Arc::new(Dispatcher::from_config(&config.catalog));
        let peer = PeerClient::new(&config.peer)?;
        Ok(Self {
            config: Arc::new(config),
            dispatcher,
            peer,
        })
    }
}

/// HTTP server for a parsing node.
pub struct HttpServer {
    router: Router,
    config: Arc<NodeConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: NodeConfig) -> Result<Self, PeerError> {
        let state = AppState::new(config)?;
        let config = state.config.clone();
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &NodeConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::welcome))
            .route("/parse/{set}", get(handlers::parse_all))
            .route("/parse/{set}/{format}", get(handlers::parse_one))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            node = %self.config.node.name,
            peer = %self.config.peer.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
