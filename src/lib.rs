//! Access-controlled HTTP forwarding proxy library.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │               WHITELIST PROXY                  │
//!                      │                                                │
//!   Client Request     │  ┌──────────┐   ┌───────────────────────────┐ │
//!   ───────────────────┼─▶│   http   │──▶│  security::access_control │ │
//!                      │  │  server  │   │  (loopback + prefix match) │ │
//!                      │  └──────────┘   └──────────┬────────────────┘ │
//!                      │                            │ allowed          │
//!                      │                            ▼                  │
//!                      │                   ┌──────────────┐            │
//!                      │                   │ http::target │            │
//!                      │                   │ (URL derive) │            │
//!                      │                   └──────┬───────┘            │
//!                      │                          ▼                    │
//!   Client Response    │  ┌──────────┐   ┌──────────────┐             │
//!   ◀──────────────────┼──│ body     │◀──│ http::forward │◀───────────┼── Upstream
//!                      │  │ relay    │   │ (15s timeout) │             │
//!                      │  └──────────┘   └──────────────┘             │
//!                      │                                                │
//!                      │  Cross-cutting: config (allow-list), tracing,  │
//!                      │  lifecycle (graceful shutdown)                 │
//!                      └───────────────────────────────────────────────┘
//! ```
//!
//! The allow-list is loaded once at startup and shared read-only with every
//! handler task; nothing mutates it afterwards, so no synchronization is
//! needed beyond the `Arc` it lives in.

// Core subsystems
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod security;

pub use config::{AllowList, ProxyConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
