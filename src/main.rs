//! Access-controlled HTTP forwarding proxy.
//!
//! Accepts inbound HTTP requests, checks the peer's socket address against a
//! flat-file allow-list of lexical address prefixes, and if permitted
//! re-issues the request to the URL encoded in the request path, relaying
//! the upstream body back to the caller. Requests from localhost are always
//! allowed; a request to `/http://example.com/resource` forwards to
//! `http://example.com/resource` with the same method and body.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whitelist_proxy::config::{normalize_bind_address, AllowList, ProxyConfig};
use whitelist_proxy::http::HttpServer;
use whitelist_proxy::lifecycle::Shutdown;

#[derive(Parser)]
#[command(name = "whitelist-proxy")]
#[command(about = "Access-controlled HTTP forwarding proxy", long_about = None)]
struct Cli {
    /// Address and port for the server to listen on
    #[arg(long, default_value = ":80")]
    host: String,

    /// Allow-list file path - contains address prefixes to whitelist
    #[arg(long, default_value = "example.config")]
    config: String,

    /// Total timeout for each outbound request, in seconds
    #[arg(long, default_value_t = 15)]
    upstream_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whitelist_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("whitelist-proxy v0.1.0 starting");

    let mut config = ProxyConfig::default();
    config.listener.bind_address = normalize_bind_address(&cli.host);
    config.allow_list_path = PathBuf::from(&cli.config);
    config.timeouts.upstream_secs = cli.upstream_timeout_secs;

    // A missing or unreadable allow-list is non-fatal: the loopback bypass
    // still applies, so the proxy degrades to localhost-only.
    let allow_list = match AllowList::load(&config.allow_list_path) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "error while parsing allow-list file");
            tracing::warn!("only requests from localhost will be allowed");
            AllowList::empty()
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        allowed_prefixes = ?allow_list.prefixes(),
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, allow_list)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
