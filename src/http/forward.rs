//! Outbound request forwarding.
//!
//! # Responsibilities
//! - Access decision for the inbound peer
//! - Build the outbound request (inbound method + body stream, derived URL)
//! - Issue the call through the shared client under its total timeout
//! - Buffer the upstream body for relay
//!
//! # Design Decisions
//! - Every failure is terminal for the request: no retries, no fallback.
//!   The caller logs once and answers with a bare status code.
//! - The inbound body is streamed into the outbound request untouched; only
//!   the upstream response body is fully buffered.
//! - Redirect handling is whatever the client defaults to.

use axum::body::{Body, Bytes};
use axum::extract::Request;
use thiserror::Error;
use url::Url;

use crate::config::AllowList;
use crate::http::target::derive_target;
use crate::security::access_control::is_allowed;

/// Terminal failure while forwarding one request.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The derived target URL did not parse.
    #[error("invalid target URL {target:?}: {source}")]
    BadTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    /// The outbound call failed: connect error, timeout, protocol error.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    /// The response arrived but its body could not be read in full.
    #[error("failed to read upstream body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Tagged result of handling one inbound request.
pub enum Outcome {
    /// Access granted, upstream answered; the buffered body to relay.
    Forwarded(Bytes),
    /// Peer is not on the allow-list; no upstream call was made.
    Denied,
    /// Access granted but the forwarding attempt failed.
    Failed(ForwardError),
}

/// Run the full access-check → derive → forward sequence for one request.
///
/// A denied peer short-circuits before any URL work happens, so a spy
/// upstream observes zero calls for denied traffic.
pub async fn dispatch(
    client: &reqwest::Client,
    allow_list: &AllowList,
    peer_addr: &str,
    request: Request<Body>,
) -> Outcome {
    if !is_allowed(peer_addr, allow_list) {
        return Outcome::Denied;
    }

    let raw = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), |pq| pq.as_str().to_string());
    let target = derive_target(&raw);

    tracing::debug!(target = %target, "forwarding request");

    let (parts, body) = request.into_parts();
    match forward(client, parts.method, &target, body).await {
        Ok(bytes) => Outcome::Forwarded(bytes),
        Err(e) => Outcome::Failed(e),
    }
}

/// Issue one outbound request and buffer the upstream response body.
///
/// The client's configured timeout covers the whole exchange, connect
/// through final body byte, matching the fixed per-request budget.
pub async fn forward(
    client: &reqwest::Client,
    method: axum::http::Method,
    target: &str,
    body: Body,
) -> Result<Bytes, ForwardError> {
    let url = Url::parse(target).map_err(|source| ForwardError::BadTarget {
        target: target.to_string(),
        source,
    })?;

    let response = client
        .request(method, url)
        .body(reqwest::Body::wrap_stream(body.into_data_stream()))
        .send()
        .await
        .map_err(ForwardError::Upstream)?;

    response.bytes().await.map_err(ForwardError::Body)
}
