//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (--host, --config, --upstream-timeout-secs)
//!     → ProxyConfig (assembled in main)
//! allow-list file (flat text, one prefix per line)
//!     → allow_list.rs (parse, skip comments/blanks)
//!     → AllowList (ordered, immutable)
//!     → shared via Arc with all handler tasks
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - The allow-list file stays flat newline-delimited text; a load failure
//!   is non-fatal and degrades to "localhost only"
//! - All fields have defaults matching the original flag defaults

pub mod allow_list;

pub use allow_list::{AllowList, ConfigError};

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Path to the allow-list file.
    pub allow_list_path: std::path::PathBuf,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            allow_list_path: std::path::PathBuf::from("example.config"),
            timeouts: TimeoutConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:80").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:80".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Total time budget for one outbound request, including reading the
    /// upstream body, in seconds.
    pub upstream_secs: u64,

    /// Inbound request timeout in seconds. Must exceed the upstream budget
    /// so the outbound deadline fires first.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_secs: 15,
            request_secs: 30,
        }
    }
}

/// Expand a bare `:PORT` bind address into `0.0.0.0:PORT`.
///
/// The CLI accepts the shorthand for compatibility with the original flag
/// format; `TcpListener::bind` requires a host part.
pub fn normalize_bind_address(host: &str) -> String {
    if host.starts_with(':') {
        format!("0.0.0.0{host}")
    } else {
        host.to_string()
    }
}
