//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (tracing, inbound timeout, request ID)
//! - Capture the peer socket address for the access decision
//! - Map forwarding outcomes to responses
//! - Graceful shutdown on Ctrl+C or an explicit trigger

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{AllowList, ProxyConfig};
use crate::http::forward::{dispatch, Outcome};
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};

/// Application state injected into handlers.
///
/// The allow-list is immutable after startup; the client is internally
/// synchronized, so the whole state is cheaply cloneable and lock-free.
#[derive(Clone)]
pub struct AppState {
    pub allow_list: Arc<AllowList>,
    pub client: reqwest::Client,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and allow-list.
    pub fn new(config: &ProxyConfig, allow_list: AllowList) -> Result<Self, reqwest::Error> {
        // One shared outbound client; its timeout covers connect through the
        // final body byte of each upstream exchange.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.upstream_secs))
            .build()?;

        let state = AppState {
            allow_list: Arc::new(allow_list),
            client,
        };

        let router = Self::build_router(config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
///
/// Checks the peer against the allow-list, forwards the request to the URL
/// encoded in the path, and relays the raw upstream body. Only body bytes
/// are relayed; upstream status and headers are not propagated.
async fn proxy_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let peer_addr = addr.to_string();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    match dispatch(&state.client, &state.allow_list, &peer_addr, request).await {
        Outcome::Forwarded(body) => {
            tracing::debug!(
                request_id = %request_id,
                peer_addr = %peer_addr,
                bytes = body.len(),
                "upstream body relayed"
            );
            body.into_response()
        }
        Outcome::Denied => {
            tracing::warn!(
                request_id = %request_id,
                peer_addr = %peer_addr,
                "peer not on allow-list, request denied"
            );
            StatusCode::FORBIDDEN.into_response()
        }
        Outcome::Failed(error) => {
            tracing::error!(
                request_id = %request_id,
                peer_addr = %peer_addr,
                error = %error,
                "forwarding failed"
            );
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

/// Wait for Ctrl+C or an explicit shutdown trigger.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
        _ = shutdown.recv() => {
            tracing::info!("shutdown triggered");
        }
    }
}
